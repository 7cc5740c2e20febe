//! Envelope exchanged between the page host and the background handler.

use panel_logging::LogLevel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageAction {
    PageInfo,
    UpdateSettings,
    ReportError,
    /// Any action this build does not know about.
    Unknown(String),
}

impl From<String> for MessageAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pageInfo" => MessageAction::PageInfo,
            "updateSettings" => MessageAction::UpdateSettings,
            "reportError" => MessageAction::ReportError,
            _ => MessageAction::Unknown(value),
        }
    }
}

impl From<MessageAction> for String {
    fn from(action: MessageAction) -> Self {
        match action {
            MessageAction::PageInfo => "pageInfo".to_string(),
            MessageAction::UpdateSettings => "updateSettings".to_string(),
            MessageAction::ReportError => "reportError".to_string(),
            MessageAction::Unknown(other) => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub action: MessageAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Message {
    pub fn new(action: MessageAction) -> Self {
        Self { action, data: None }
    }

    pub fn with_data<T: Serialize>(action: MessageAction, data: &T) -> serde_json::Result<Self> {
        Ok(Self {
            action,
            data: Some(serde_json::to_value(data)?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    /// RFC 3339 instant the info was collected.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSettings {
    pub log_level: LogLevel,
    pub debug_mode: bool,
}
