mod builder;
mod similarity;
mod types;
mod writer;


pub use builder::{build_matrix, BuildOptions};
pub use similarity::cosine_similarity;
pub use types::SimilarityMatrix;
pub use writer::{write_matrix, write_matrix_to_path};
