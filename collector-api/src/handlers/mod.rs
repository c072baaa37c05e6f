pub mod account_handler;
pub mod collection_handler;
pub mod listing_handler;
pub mod popular_handler;
