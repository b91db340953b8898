pub mod district;
pub mod restaurant;
