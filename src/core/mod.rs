pub mod errors;
pub mod models;

pub use errors::LinkError;
pub use models::{
    CopyReport,
    Direction,
    FieldRule,
    FieldWrite,
    LinkAction,
    MissingField,
    Note,
    NoteRole,
    RuleSet,
    RuleSide,
};
