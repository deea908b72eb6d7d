//! Input file parsing.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{ParsedInput, SourceMetadata};
