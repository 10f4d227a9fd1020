use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Entry, Finding};

/// Scan configuration reported once by the producer, before any other message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub protocol_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scanner_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scanner_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_last_modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub go_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub scan_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub message: String,
}

impl Progress {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One message of the producer's JSON stream, e.g. `{"osv": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Message {
    Config(ScanConfig),
    Progress(Progress),
    Osv(Entry),
    Finding(Finding),
}
