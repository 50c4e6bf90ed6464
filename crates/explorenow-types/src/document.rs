//! Travel document types

use crate::validate::{non_empty, Validate, ValidationError};
use crate::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded document metadata (passport, visa, insurance, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelDocument {
    pub id: Id,
    pub user_id: Id,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub document_type: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTravelDocument {
    pub user_id: Id,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    #[serde(default)]
    pub document_type: Option<String>,
}

impl Validate for NewTravelDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("fileName", &self.file_name)?;
        non_empty("fileType", &self.file_type)?;
        non_empty("filePath", &self.file_path)
    }
}

impl TravelDocument {
    pub fn from_new(id: Id, new: NewTravelDocument, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            file_name: new.file_name,
            file_type: new.file_type,
            file_path: new.file_path,
            document_type: new.document_type,
            upload_date: now,
            created_at: now,
        }
    }
}
