//! Conversion between typed models and store documents.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use screams_core::error::{AppError, ErrorKind};
use screams_core::result::AppResult;
use screams_core::types::{Collection, Document, Fields};

/// A typed view of documents in one collection.
///
/// The document id is exposed on the model under [`ID_FIELD`](Self::ID_FIELD)
/// (e.g. `screamId`) but is not duplicated inside the stored body.
pub trait DocumentModel: Serialize + DeserializeOwned + Send + Sync {
    /// Collection the model lives in.
    const COLLECTION: Collection;

    /// Name of the model field carrying the document id.
    const ID_FIELD: &'static str;

    /// The document id.
    fn id(&self) -> &str;

    /// Decode a stored document.
    fn from_document(doc: Document) -> AppResult<Self> {
        let Document { id, mut data } = doc;
        data.insert(Self::ID_FIELD.to_string(), Value::String(id.clone()));
        serde_json::from_value(Value::Object(data)).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Malformed {} document '{id}'", Self::COLLECTION),
                e,
            )
        })
    }

    /// Encode the model as a stored body (without the id field).
    fn to_fields(&self) -> AppResult<Fields> {
        match serde_json::to_value(self)? {
            Value::Object(mut map) => {
                map.remove(Self::ID_FIELD);
                Ok(map)
            }
            other => Err(AppError::new(
                ErrorKind::Serialization,
                format!(
                    "{} model serialized to a non-object value: {other}",
                    Self::COLLECTION
                ),
            )),
        }
    }

    /// Decode a list of stored documents.
    fn from_documents(docs: Vec<Document>) -> AppResult<Vec<Self>> {
        docs.into_iter().map(Self::from_document).collect()
    }
}
