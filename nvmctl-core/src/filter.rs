// SPDX-License-Identifier: GPL-3.0-only

//! Attribute-based record filtering
//!
//! Command handlers narrow collections of device/goal/namespace records by
//! user-supplied target values. Besides the matched subset, the engine
//! tracks whether every requested value matched *somewhere* in the input,
//! so a typo in a target (`-dimm 0x0009` on a two-DIMM box) surfaces as a
//! bad-target error instead of a silently empty table.

use serde::{Deserialize, Serialize};

use nvmctl_contracts::TranslateError;
use nvmctl_types::AttributeRecord;

/// One filter criterion: an attribute name plus its accepted values
///
/// A record passes the criterion when its attribute value case-insensitively
/// equals any accepted value. An empty value set never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub attribute_name: String,
    pub accepted_values: Vec<String>,
    /// Silent criteria may match nothing without raising a bad-target error
    pub silent: bool,
}

impl FilterCriterion {
    pub fn new(
        attribute_name: impl Into<String>,
        accepted_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            accepted_values: accepted_values.into_iter().map(Into::into).collect(),
            silent: false,
        }
    }

    /// A criterion allowed to produce an empty result set without error
    pub fn silent(
        attribute_name: impl Into<String>,
        accepted_values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            silent: true,
            ..Self::new(attribute_name, accepted_values)
        }
    }
}

/// Criteria are AND-ed; values within one criterion are OR-ed
pub type FilterSet = Vec<FilterCriterion>;

/// A filter value that matched no record in the entire input collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingValue {
    pub attribute: String,
    pub value: String,
    pub silent: bool,
}

/// Result of evaluating a [`FilterSet`] against a record collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Records satisfying every criterion, in original input order
    pub matched: Vec<AttributeRecord>,
    /// Values that matched nothing anywhere, in criterion order
    pub dangling: Vec<DanglingValue>,
}

/// Evaluate the filter without raising on dangling values
pub fn evaluate(records: &[AttributeRecord], filters: &FilterSet) -> MatchOutcome {
    if filters.is_empty() {
        return MatchOutcome {
            matched: records.to_vec(),
            dangling: Vec::new(),
        };
    }

    // (attribute, value) pairs we have yet to see anywhere in the input;
    // deduplicated so repeated criteria share one entry
    let mut seen: Vec<(DanglingValue, bool)> = Vec::new();
    for criterion in filters {
        for value in &criterion.accepted_values {
            let duplicate = seen.iter().any(|(entry, _)| {
                entry.attribute.eq_ignore_ascii_case(&criterion.attribute_name)
                    && entry.value.eq_ignore_ascii_case(value)
            });
            if !duplicate {
                seen.push((
                    DanglingValue {
                        attribute: criterion.attribute_name.clone(),
                        value: value.clone(),
                        silent: criterion.silent,
                    },
                    false,
                ));
            }
        }
    }

    let mut matched = Vec::new();
    for record in records {
        let mut retained = true;
        for criterion in filters {
            let value_matched = match record.get(&criterion.attribute_name) {
                Some(attribute) => {
                    let rendered = attribute.to_display_string();
                    let mut hit = false;
                    for value in &criterion.accepted_values {
                        if rendered.eq_ignore_ascii_case(value) {
                            mark_seen(&mut seen, &criterion.attribute_name, value);
                            hit = true;
                            break;
                        }
                    }
                    hit
                }
                // records without the attribute never satisfy the criterion
                None => false,
            };
            if !value_matched {
                retained = false;
                // record is out, but keep checking the remaining criteria so
                // their value-seen tracking still reflects this record
            }
        }
        if retained {
            matched.push(record.clone());
        }
    }

    MatchOutcome {
        matched,
        dangling: seen
            .into_iter()
            .filter(|(_, was_seen)| !was_seen)
            .map(|(entry, _)| entry)
            .collect(),
    }
}

/// Evaluate the filter; when `check_matches` is set, any non-silent value
/// that matched nothing in the whole collection is a bad-target error
pub fn apply(
    records: &[AttributeRecord],
    filters: &FilterSet,
    check_matches: bool,
) -> Result<Vec<AttributeRecord>, TranslateError> {
    let outcome = evaluate(records, filters);
    if check_matches {
        if let Some(dangling) = outcome.dangling.iter().find(|entry| !entry.silent) {
            return Err(TranslateError::DanglingFilterValue {
                attribute: dangling.attribute.clone(),
                value: dangling.value.clone(),
            });
        }
    }
    Ok(outcome.matched)
}

fn mark_seen(seen: &mut [(DanglingValue, bool)], attribute: &str, value: &str) {
    if let Some(entry) = seen.iter_mut().find(|(entry, _)| {
        entry.attribute.eq_ignore_ascii_case(attribute) && entry.value.eq_ignore_ascii_case(value)
    }) {
        entry.1 = true;
    }
}
