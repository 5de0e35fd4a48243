use std::collections::HashMap;

use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::LinkError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Field {
    pub value: String,
    order: u32,
}

/// A note as AnkiConnect's notesInfo reports it.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: u64,
    tags: Vec<String>,
    pub fields: HashMap<String, Field>,
    pub model_name: String,
    #[serde(rename = "mod")]
    modified: u64,
    pub cards: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelField {
    pub name: String,
    pub ord: u32,
}

/// Note type description from findModelsByName. `sortf` indexes into
/// `flds` to pick the sort field.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub id: u64,
    #[serde(rename = "sortf")]
    pub sort_field_index: usize,
    #[serde(rename = "flds")]
    pub fields: Vec<ModelField>,
}

impl ModelInfo {
    /// Name of the designated sort field, falling back to the first
    /// field when the stored index is out of range.
    pub fn sort_field_name(&self) -> Option<&str> {
        self.fields
            .get(self.sort_field_index)
            .or_else(|| self.fields.first())
            .map(|f| f.name.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, LinkError> {
        if let Some(error) = self.error {
            return Err(LinkError::AnkiConnect(error));
        }
        self.result.ok_or_else(|| LinkError::AnkiConnect("empty result".to_string()))
    }
}

async fn make_request<T: for<'de> Deserialize<'de>>(
    action: &str,
    params: Option<serde_json::Value>,
) -> Result<ApiResponse<T>, reqwest::Error> {
    let mut body = serde_json::Map::new();
    body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
    body.insert("version".to_string(), serde_json::Value::Number((6).into()));

    if let Some(params) = params {
        body.insert("params".to_string(), params);
    }

    let response: ApiResponse<T> =
        Client::new().post("http://localhost:8765/").json(&body).send().await?.json().await?;

    Ok(response)
}

//Will just use to check if ankiconnect is online
pub async fn get_version() -> Result<u32, LinkError> {
    let response: ApiResponse<u32> = make_request("version", None).await?;
    response.into_result()
}

pub async fn find_note_ids(query: &str) -> Result<Vec<u64>, LinkError> {
    let params = serde_json::json!({ "query": query });
    let response: ApiResponse<Vec<u64>> = make_request("findNotes", Some(params)).await?;
    response.into_result()
}

pub async fn get_notes(note_ids: Vec<u64>) -> Result<Vec<NoteInfo>, LinkError> {
    let params = serde_json::json!({ "notes": note_ids });
    let response: ApiResponse<Vec<NoteInfo>> = make_request("notesInfo", Some(params)).await?;
    response.into_result()
}

pub async fn find_model(model_name: &str) -> Result<Option<ModelInfo>, LinkError> {
    let params = serde_json::json!({ "modelNames": [model_name] });
    let response: ApiResponse<Vec<ModelInfo>> =
        make_request("findModelsByName", Some(params)).await?;
    Ok(response.into_result()?.into_iter().next())
}

/// Write a note's fields back to the collection.
pub async fn update_note_fields(
    note_id: u64,
    fields: &HashMap<String, String>,
) -> Result<(), LinkError> {
    let params = serde_json::json!({ "note": { "id": note_id, "fields": fields } });
    let response: ApiResponse<serde_json::Value> =
        make_request("updateNoteFields", Some(params)).await?;

    // updateNoteFields returns null on success.
    if let Some(error) = response.error {
        return Err(LinkError::AnkiConnect(error));
    }
    Ok(())
}

/// Search query matching every note of a model, quoted when the model
/// name would otherwise break the query syntax.
pub fn model_query(model_name: &str) -> String {
    if model_name.contains(' ') || model_name.contains(':') || model_name.contains('"') {
        format!("note:\"{}\"", model_name.replace('"', "\\\""))
    } else {
        format!("note:{}", model_name)
    }
}
