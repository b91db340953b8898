pub mod churn_signal;
pub mod order_rollup;
pub mod reseller_binding;
pub mod revenue_share;
