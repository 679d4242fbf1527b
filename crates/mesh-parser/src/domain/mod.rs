//! Domain module for the Operation Pattern Matcher

mod comparisons;
pub mod descriptions;
pub mod errors;
pub mod matching;

pub use errors::ParserError;
