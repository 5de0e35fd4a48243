pub mod anki;
pub mod core;
pub mod linker;
pub mod persistence;
pub mod rules;

pub use crate::{
    anki::LinkService,
    core::{
        CopyReport,
        Direction,
        FieldRule,
        LinkAction,
        LinkError,
        Note,
        RuleSet,
    },
    linker::{
        find_neighbor,
        link,
    },
    rules::RuleStore,
};
