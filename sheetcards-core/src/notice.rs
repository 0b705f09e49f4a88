//! Status banners shown alongside the rendered cards

use crate::error::CardError;
use serde::{Deserialize, Serialize};

/// Severity of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

impl From<&CardError> for Notice {
    fn from(err: &CardError) -> Self {
        match err {
            CardError::Read(e) => {
                Notice::error(format!("An error occurred while reading the file: {}", e))
            }
            CardError::EmptyTable(_) => Notice::warning("The file has no data rows."),
            CardError::Range(e) => Notice::error(format!("Error: {}.", e)),
        }
    }
}
