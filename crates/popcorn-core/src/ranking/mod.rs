pub mod order;
pub mod recommender;

pub use order::{compare_candidates, rank_all, select_top_k};
pub use recommender::{DEFAULT_TOP_K, Recommender};
