use std::time::Duration;

use api::NoteInfo;
use tokio::time::sleep;

use crate::{
    core::{
        CopyReport,
        LinkAction,
        LinkError,
        Note,
    },
    linker,
    rules::RuleStore,
};

pub mod api;

/// Glue between the rule store, the link engine and the AnkiConnect
/// collection: fetches a note's siblings, runs one link transaction and
/// writes the mutated notes back. Stateless between calls apart from the
/// read-mostly store.
pub struct LinkService {
    store: RuleStore,
}

impl LinkService {
    pub fn new(store: RuleStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Mutation surface for the rule editor.
    pub fn store_mut(&mut self) -> &mut RuleStore {
        &mut self.store
    }

    /// One link transaction: resolve the note's type, fail fast when no
    /// rules are registered for it, fetch the full sibling set sorted by
    /// the type's sort field, copy per the rules and persist whatever
    /// was written.
    pub async fn link_adjacent(
        &self,
        note_id: u64,
        action: LinkAction,
    ) -> Result<CopyReport, LinkError> {
        let current = api::get_notes(vec![note_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LinkError::Custom(format!("Note {} not found", note_id)))?;
        let model_name = current.model_name.clone();

        if self.store.get(&model_name).is_none() {
            return Err(LinkError::NoRuleSet(model_name));
        }

        let sort_field = self.sort_field(&model_name).await?;
        let mut notes = self.notes_of_model(&model_name, &sort_field).await?;

        let report = linker::link(
            &mut notes,
            note_id,
            self.store.get(&model_name),
            action.direction(),
            action.bothways(),
        )?;

        for id in report.mutated_note_ids() {
            let note = notes
                .iter()
                .find(|n| n.id == id)
                .ok_or_else(|| LinkError::Custom(format!("Mutated note {} disappeared", id)))?;
            api::update_note_fields(id, &note.fields).await?;
        }

        Ok(report)
    }

    async fn sort_field(&self, model_name: &str) -> Result<String, LinkError> {
        let model = api::find_model(model_name)
            .await?
            .ok_or_else(|| LinkError::Custom(format!("Unknown note type: {}", model_name)))?;

        model
            .sort_field_name()
            .map(|name| name.to_string())
            .ok_or_else(|| LinkError::Custom(format!("Note type '{}' has no fields", model_name)))
    }

    async fn notes_of_model(
        &self,
        model_name: &str,
        sort_field: &str,
    ) -> Result<Vec<Note>, LinkError> {
        let note_ids = api::find_note_ids(&api::model_query(model_name)).await?;
        let infos = api::get_notes(note_ids).await?;
        Ok(infos.into_iter().map(|info| to_note(info, sort_field)).collect())
    }
}

/// Flatten an AnkiConnect note into the engine's shape. A note missing
/// the sort field gets an empty sort key and orders by id among its
/// peers.
fn to_note(info: NoteInfo, sort_field: &str) -> Note {
    let sort_key = info.fields.get(sort_field).map(|f| f.value.clone()).unwrap_or_default();
    let fields = info.fields.into_iter().map(|(name, field)| (name, field.value)).collect();

    Note { id: info.note_id, note_type_name: info.model_name, fields, sort_key }
}

pub async fn wait_awake(wait_time: u64, max_attempts: u32) -> Result<bool, LinkError> {
    for attempt in 1..=max_attempts {
        match api::get_version().await {
            Ok(version) => {
                println!("AnkiConnect reachable, version {}", version);
                return Ok(true);
            }
            Err(err) => {
                eprintln!(
                    "AnkiConnect not reachable (attempt {} of {}): {}",
                    attempt, max_attempts, err
                );
                if attempt < max_attempts {
                    sleep(Duration::from_secs(wait_time)).await;
                }
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::{
        api::{
            model_query,
            ModelInfo,
            NoteInfo,
        },
        to_note,
    };

    #[test]
    fn model_query_quotes_awkward_names() {
        assert_eq!(model_query("Subs2Anki"), "note:Subs2Anki");
        assert_eq!(model_query("My Model"), "note:\"My Model\"");
        assert_eq!(model_query("A\"B"), "note:\"A\\\"B\"");
    }

    #[test]
    fn note_info_flattens_to_engine_note() {
        let json = r#"{
            "noteId": 42,
            "tags": [],
            "fields": {
                "Front": { "value": "front text", "order": 0 },
                "Back": { "value": "back text", "order": 1 }
            },
            "modelName": "Basic",
            "mod": 0,
            "cards": [7]
        }"#;
        let info: NoteInfo = serde_json::from_str(json).unwrap();

        let note = to_note(info, "Front");
        assert_eq!(note.id, 42);
        assert_eq!(note.note_type_name, "Basic");
        assert_eq!(note.sort_key, "front text");
        assert_eq!(note.field("Back"), Some("back text"));

        // Absent sort field leaves the key empty; id ordering takes over.
        let info: NoteInfo = serde_json::from_str(json).unwrap();
        assert_eq!(to_note(info, "Missing").sort_key, "");
    }

    #[test]
    fn sort_field_falls_back_to_first_field() {
        let json = r#"{
            "name": "Basic",
            "id": 1,
            "sortf": 9,
            "flds": [
                { "name": "Front", "ord": 0 },
                { "name": "Back", "ord": 1 }
            ]
        }"#;
        let model: ModelInfo = serde_json::from_str(json).unwrap();
        assert_eq!(model.sort_field_name(), Some("Front"));
    }
}
