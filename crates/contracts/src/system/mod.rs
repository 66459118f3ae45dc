pub mod dashboard_config;
