//! Core library for the collector marketplace: data model, order
//! normalization, unit conversion, the OpenSea data gateway and the
//! wallet-driven order action engine.

pub mod helpers;
pub mod interfaces;
pub mod models;
pub mod services;

pub use helpers::app_config::AppConfig;
pub use services::gateway::{GatewayError, MarketplaceData, OpenSeaGateway};
