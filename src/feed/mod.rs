pub mod classify;
pub mod normalize;
pub mod parser;

pub use parser::{ParsedFeed, parse_feed};
