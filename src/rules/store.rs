use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use crate::{
    core::{
        LinkError,
        RuleSet,
    },
    persistence::get_data_file_path,
};

pub const RULES_FILE: &str = "link_rules.json";

/// Name-keyed rule sets, one per note type, backed by a JSON file in the
/// app data dir. Loaded once at startup, flushed on every mutation. The
/// link engine only reads; mutations belong to the rule editor.
#[derive(Debug)]
pub struct RuleStore {
    rules: HashMap<String, RuleSet>,
    file_path: PathBuf,
}

impl RuleStore {
    pub fn load() -> Result<Self, LinkError> {
        Self::load_from(get_data_file_path(RULES_FILE))
    }

    pub fn load_from(file_path: PathBuf) -> Result<Self, LinkError> {
        let rules = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| LinkError::Custom(format!("Failed to read rule file: {}", e)))?;

            serde_json::from_str::<HashMap<String, RuleSet>>(&content)
                .map_err(|e| LinkError::Custom(format!("Failed to parse rule file: {}", e)))?
        } else {
            HashMap::new()
        };

        Ok(Self { rules, file_path })
    }

    /// In-memory store for embedding hosts and tests; `save` still writes
    /// to the default rule file location.
    pub fn with_rules(rules: HashMap<String, RuleSet>) -> Self {
        Self { rules, file_path: get_data_file_path(RULES_FILE) }
    }

    pub fn save(&self) -> Result<(), LinkError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LinkError::Custom(format!("Failed to create rule file directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.rules)
            .map_err(|e| LinkError::Custom(format!("Failed to serialize rule file: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| LinkError::Custom(format!("Failed to write rule file: {}", e)))
    }

    /// Exact, case-sensitive note type lookup. No fallback rule set.
    pub fn get(&self, note_type_name: &str) -> Option<&RuleSet> {
        self.rules.get(note_type_name)
    }

    pub fn upsert(&mut self, ruleset: RuleSet) -> Result<(), LinkError> {
        self.rules.insert(ruleset.note_type.clone(), ruleset);
        self.save()
    }

    pub fn remove(&mut self, note_type_name: &str) -> Result<bool, LinkError> {
        if self.rules.remove(note_type_name).is_some() {
            self.save()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn note_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
