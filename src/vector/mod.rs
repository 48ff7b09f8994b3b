mod parse;
mod types;


pub use parse::parse_line;
pub use types::SparseVector;

/// Dimension index of a sparse entry
pub type DimIndex = u32;
