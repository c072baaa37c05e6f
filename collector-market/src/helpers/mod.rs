pub mod app_config;
pub mod chain;
pub mod typed_data;
pub mod units;
