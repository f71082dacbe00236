pub mod classifier;
pub mod helpers;
pub mod recommender;

pub use classifier::classify_item;
pub use recommender::{group_name_for, recommend_parent_item};
