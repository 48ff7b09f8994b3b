// Public API exports
pub mod error;
pub mod matrix;
pub mod report;
pub mod store;
pub mod vector;

// Re-export main types for convenience
pub use error::PipelineError;

pub use vector::{parse_line, DimIndex, SparseVector};

pub use store::VectorStore;

pub use matrix::{
    build_matrix, cosine_similarity, write_matrix, write_matrix_to_path, BuildOptions,
    SimilarityMatrix,
};

pub use report::{sha256_file, PhaseTimings, RunReport, RunStats};
