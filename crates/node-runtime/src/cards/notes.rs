//! `demo/notes`: a per-topic note list. Data capability only.
//!
//! Notes are written by the owner of the instance's API key through
//! `POST /api/state` as `{"notes": [...]}`; rendering never changes them.

use async_trait::async_trait;
use cs_02_card_catalog::{Capabilities, CardModule, CardModuleError, DataRequest, DataResponse};
use serde_json::{json, Value};
use shared_types::CardDescriptor;

pub const PACK: &str = "demo";
pub const NAME: &str = "notes";

/// Only the newest notes are rendered.
pub const MAX_RENDERED: usize = 50;

#[derive(Debug, Default)]
pub struct NotesCard;

#[async_trait]
impl CardModule for NotesCard {
    fn descriptor(&self) -> CardDescriptor {
        CardDescriptor::new(PACK, NAME)
            .with_meta("title", "Notes")
            .with_meta("description", "Shared note list per topic")
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE.with_data()
    }

    async fn generate(&self, request: DataRequest) -> Result<DataResponse, CardModuleError> {
        let topic = request.params.get("topic").cloned().unwrap_or_default();

        let notes: Vec<&Value> = match request.state.as_ref().map(|s| s.as_value()) {
            None => Vec::new(),
            Some(Value::Object(doc)) => match doc.get("notes") {
                Some(Value::Array(items)) => {
                    let skip = items.len().saturating_sub(MAX_RENDERED);
                    items.iter().skip(skip).filter(|v| v.is_string()).collect()
                }
                None => Vec::new(),
                Some(_) => {
                    return Err(CardModuleError::Handler("state.notes must be an array".into()))
                }
            },
            Some(_) => return Err(CardModuleError::Handler("state must be an object".into())),
        };

        Ok(DataResponse {
            view: json!({ "topic": topic, "notes": notes }),
            state: None,
        })
    }
}
