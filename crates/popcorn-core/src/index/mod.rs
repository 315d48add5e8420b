pub mod catalog;
pub mod matrix;

pub use catalog::Catalog;
pub use matrix::SimilarityMatrix;
