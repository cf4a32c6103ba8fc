// SPDX-License-Identifier: GPL-3.0-only

pub mod error;
pub mod traits;

pub use error::{LayoutError, LayoutErrorKind, SettingsTokenIssue, TranslateError};
pub use traits::{DisplayPreferences, LayoutService, PlatformCapabilities};
