pub mod actions;
pub mod gateway;
pub mod normalizer;
