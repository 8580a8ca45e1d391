// Rule catalog - which enum types get flattened, and how

mod parser;
mod types;

pub use parser::{parse_catalog, parse_catalog_str};
pub use types::*;
