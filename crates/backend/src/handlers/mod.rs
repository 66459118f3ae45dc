pub mod dashboard_config;
pub mod proxy;
