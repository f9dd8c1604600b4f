pub mod error;
pub mod parser;

pub use error::{OffError, OffResult, Section};
pub use parser::{DeclaredCounts, OffReader, load_off, parse_off};
