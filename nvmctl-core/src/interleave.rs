// SPDX-License-Identifier: GPL-3.0-only

//! Interleave settings-token parsing
//!
//! App Direct settings arrive as a compact `_`-delimited string such as
//! `Mirror_128B_64B` or `x1`: an optional redundancy keyword followed by up
//! to two interleave widths (IMC then channel). This module turns that into
//! a validated [`InterleaveGeometry`].

use tracing::debug;

use nvmctl_contracts::{PlatformCapabilities, SettingsTokenIssue, TranslateError};
use nvmctl_types::{InterleaveGeometry, InterleaveWidth};

const SETTINGS_TOKEN_SEPARATOR: char = '_';
const SETTING_MIRROR: &str = "Mirror";
const SETTING_BY_ONE: &str = "ByOne";
// accepted alias for ByOne on newer CLI surfaces
const SETTING_BY_ONE_ALIAS: &str = "x1";
const SIZE_REMAINING: &str = "Remaining";
const MAX_TOKENS: usize = 3;

/// Case-insensitive match for the reserved `Remaining` size sentinel
pub fn is_remaining_keyword(size: &str) -> bool {
    size.eq_ignore_ascii_case(SIZE_REMAINING)
}

/// Accepts decimal digit strings, or `0x`/`0X` followed by hex digits
pub fn is_valid_number(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
    }
}

/// Parses settings token strings into interleave geometry
///
/// When the string names no widths at all, the platform's recommended
/// default pair is used; without one the input is rejected, since the user
/// must then supply explicit sizes.
pub struct InterleaveSettingsParser<'a> {
    capabilities: &'a dyn PlatformCapabilities,
}

impl<'a> InterleaveSettingsParser<'a> {
    pub fn new(capabilities: &'a dyn PlatformCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn parse(&self, settings: &str) -> Result<InterleaveGeometry, TranslateError> {
        let tokens = tokenize(settings)?;
        let mut geometry = InterleaveGeometry::default();

        let mut widths = tokens.as_slice();
        if let Some((first, rest)) = tokens.split_first() {
            if first.eq_ignore_ascii_case(SETTING_MIRROR) {
                geometry.mirrored = true;
                widths = rest;
            } else if first.eq_ignore_ascii_case(SETTING_BY_ONE)
                || first.eq_ignore_ascii_case(SETTING_BY_ONE_ALIAS)
            {
                geometry.by_one = true;
                widths = rest;
            }
        }

        match widths {
            [] => {
                let (imc, channel) = self
                    .capabilities
                    .recommended_interleave_sizes()
                    .ok_or(TranslateError::NoRecommendedDefault)?;
                debug!(%imc, %channel, "using platform-recommended interleave sizes");
                geometry.imc_width = imc;
                geometry.channel_width = channel;
            }
            [only] => {
                geometry.imc_width = parse_width(only)?;
                geometry.channel_width = geometry.imc_width;
            }
            [imc, channel] => {
                geometry.imc_width = parse_width(imc)?;
                geometry.channel_width = parse_width(channel)?;
            }
            _ => {
                // three width tokens only fit if one was a redundancy keyword
                return Err(token_count_error(settings));
            }
        }

        if geometry.imc_width.bytes() < geometry.channel_width.bytes() {
            return Err(TranslateError::InvalidSettingsToken {
                token: geometry.channel_width.label().to_string(),
                issue: SettingsTokenIssue::ChannelExceedsImc,
            });
        }

        Ok(geometry)
    }
}

fn tokenize(settings: &str) -> Result<Vec<&str>, TranslateError> {
    if settings.is_empty() {
        return Ok(Vec::new());
    }
    let tokens: Vec<&str> = settings.split(SETTINGS_TOKEN_SEPARATOR).collect();
    if tokens.iter().any(|token| token.is_empty()) || tokens.len() > MAX_TOKENS {
        return Err(token_count_error(settings));
    }
    Ok(tokens)
}

fn token_count_error(settings: &str) -> TranslateError {
    TranslateError::InvalidSettingsToken {
        token: settings.to_string(),
        issue: SettingsTokenIssue::TokenCount,
    }
}

fn parse_width(token: &str) -> Result<InterleaveWidth, TranslateError> {
    InterleaveWidth::from_token(token).ok_or_else(|| TranslateError::InvalidSettingsToken {
        token: token.to_string(),
        issue: SettingsTokenIssue::UnknownWidth,
    })
}
