// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What exactly was wrong with an interleave settings string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTokenIssue {
    /// Empty token, or more tokens than the grammar allows
    TokenCount,
    /// A token that is neither a redundancy keyword nor a known width
    UnknownWidth,
    /// Channel width numerically larger than the IMC width
    ChannelExceedsImc,
}

/// Errors produced by the request/query translation layer
///
/// Every variant carries enough context for the command layer to render a
/// precise diagnostic; nothing here is a panic path.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TranslateError {
    #[error("invalid capacity unit: {unit}")]
    InvalidUnit { unit: String },

    #[error("invalid interleave settings token: {token}")]
    InvalidSettingsToken {
        token: String,
        issue: SettingsTokenIssue,
    },

    #[error("no interleave settings given and the platform has no recommended default")]
    NoRecommendedDefault,

    #[error("no {attribute} matching the value {value}")]
    DanglingFilterValue { attribute: String, value: String },

    #[error("invalid size value: {value}")]
    InvalidSizeValue { value: String },

    #[error("invalid percentage {percent} for {property}")]
    InvalidPercentage { property: String, percent: u64 },
}

/// Failure categories reported by the external layout service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutErrorKind {
    InvalidRequest,
    NotEnoughCapacity,
    Unsupported,
    Internal,
}

/// Opaque error surfaced by the layout collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct LayoutError {
    pub kind: LayoutErrorKind,
    pub message: String,
}

impl LayoutError {
    pub fn new(kind: LayoutErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_error_roundtrips() {
        let error = TranslateError::DanglingFilterValue {
            attribute: "DimmID".into(),
            value: "0x0009".into(),
        };
        let json = serde_json::to_string(&error).expect("serialize error");
        let parsed: TranslateError = serde_json::from_str(&json).expect("deserialize error");
        assert_eq!(parsed, error);
    }

    #[test]
    fn test_settings_error_names_the_token() {
        let error = TranslateError::InvalidSettingsToken {
            token: "96B".into(),
            issue: SettingsTokenIssue::UnknownWidth,
        };
        assert!(error.to_string().contains("96B"));
    }
}
