pub mod files;
pub mod rules;

pub use rules::{load_rule_set, save_rule_set};
