pub mod item;
pub mod recommendation;

pub use item::{ExternalId, Item};
pub use recommendation::Recommendation;
