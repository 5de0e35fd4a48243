use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

/// A single flashcard data record, detached from the host collection.
/// The engine mutates `fields` in place; creating and destroying notes
/// stays with the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,                          // host note id, stable identity
    pub note_type_name: String,           // schema the note belongs to
    pub fields: HashMap<String, String>,  // field name -> content, keys fixed by note type
    pub sort_key: String,                 // value of the note type's sort field
}

impl Note {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The four invocation-surface actions, each one `link` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    PullFromPrevious,
    PullFromNext,
    BothwaysWithPrevious,
    BothwaysWithNext,
}

impl LinkAction {
    pub fn direction(self) -> Direction {
        match self {
            LinkAction::PullFromPrevious | LinkAction::BothwaysWithPrevious => Direction::Previous,
            LinkAction::PullFromNext | LinkAction::BothwaysWithNext => Direction::Next,
        }
    }

    pub fn bothways(self) -> bool {
        matches!(self, LinkAction::BothwaysWithPrevious | LinkAction::BothwaysWithNext)
    }
}

/// One directional copy instruction. Self-copy is legal (a no-op in practice).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub source_field: String,
    pub target_field: String,
}

impl FieldRule {
    pub fn new(source_field: &str, target_field: &str) -> Self {
        Self { source_field: source_field.to_string(), target_field: target_field.to_string() }
    }
}

/// Copy rules for one note type. `forward_rules` copy latter -> former,
/// `backward_rules` copy former -> latter, both applied in declared order.
/// Serde names match the persisted rule file shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub note_type: String,
    #[serde(default)]
    pub forward_rules: Vec<FieldRule>,
    #[serde(default)]
    pub backward_rules: Vec<FieldRule>,
}

/// Which of the two notes in a link a write or warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteRole {
    Current,
    Neighbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSide {
    Source,
    Target,
}

/// A rule skipped because one of its fields is absent on the note it
/// names. Non-fatal; the rest of the rule list still applies.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingField {
    pub rule: FieldRule,
    pub side: RuleSide,
    pub role: NoteRole,  // the note the rule was writing toward
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub note_id: u64,
    pub role: NoteRole,
    pub field: String,
    pub old: Option<String>,
    pub new: String,
}

/// Outcome of one `link` call: every field written, in application
/// order, plus the rules that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyReport {
    pub writes: Vec<FieldWrite>,
    pub warnings: Vec<MissingField>,
}

impl CopyReport {
    pub fn touched(&self, role: NoteRole) -> bool {
        self.writes.iter().any(|w| w.role == role)
    }

    /// Ids of the notes that received at least one write, first-write order.
    pub fn mutated_note_ids(&self) -> Vec<u64> {
        let mut ids = Vec::new();
        for write in &self.writes {
            if !ids.contains(&write.note_id) {
                ids.push(write.note_id);
            }
        }
        ids
    }
}
