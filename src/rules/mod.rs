pub mod store;

pub use store::{
    RuleStore,
    RULES_FILE,
};
