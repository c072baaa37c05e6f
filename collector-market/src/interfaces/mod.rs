pub mod notifier;
pub mod protocol;
pub mod wallet;
