//! Core domain types and abstractions

pub mod config;
pub mod feed;
pub mod fund;
pub mod log;

// Re-export main types for cleaner imports
pub use feed::FeedSource;
pub use fund::{FundHouseGroup, SchemeCategory, SchemeRecord, SchemeType};
