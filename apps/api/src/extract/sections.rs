//! Header-delimited sectioning for the scope pipeline.
//!
//! Expected model output:
//!
//! ```text
//! Deliverables:
//! - ...
//!
//! Exclusions:
//! - ...
//!
//! Client Summary:
//! ...
//! ```
//!
//! Headers are matched as literal substrings, first occurrence wins. A missing
//! section yields an empty value for that section only. Only `-` is a bullet
//! marker; lines starting with `•` or `*` are dropped.

use tracing::debug;

use super::{ExtractError, ResponseParser};
use crate::scope::models::ScopeResult;

pub const DELIVERABLES_HEADER: &str = "Deliverables:";
pub const EXCLUSIONS_HEADER: &str = "Exclusions:";
pub const SUMMARY_HEADER: &str = "Client Summary:";

const BULLET: char = '-';

#[derive(Debug, Default, Clone, Copy)]
pub struct SectionedScope;

impl ResponseParser for SectionedScope {
    type Output = ScopeResult;

    /// Never fails: missing sections degrade to empty values.
    fn parse(&self, raw: &str) -> Result<ScopeResult, ExtractError> {
        Ok(split_sections(raw))
    }
}

/// Splits raw model text into deliverables, exclusions and summary.
pub fn split_sections(raw: &str) -> ScopeResult {
    let (head, tail) = match raw.split_once(EXCLUSIONS_HEADER) {
        Some((head, tail)) => (head, Some(tail)),
        None => {
            debug!("Model output has no '{EXCLUSIONS_HEADER}' section");
            (raw, None)
        }
    };

    // The summary may sit before the exclusions or replace them; either way
    // its lines never belong to the deliverables.
    let (head, head_summary) = match head.split_once(SUMMARY_HEADER) {
        Some((head, summary)) => (head, Some(summary)),
        None => (head, None),
    };

    let deliverables_segment = match head.split_once(DELIVERABLES_HEADER) {
        Some((_, after)) => after,
        None => head,
    };

    let (exclusions_segment, tail_summary) = match tail {
        Some(tail) => match tail.split_once(SUMMARY_HEADER) {
            Some((exclusions, summary)) => (exclusions, Some(summary)),
            None => (tail, None),
        },
        None => ("", None),
    };

    let summary = head_summary
        .or(tail_summary)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    ScopeResult {
        deliverables: bullet_lines(deliverables_segment),
        exclusions: bullet_lines(exclusions_segment),
        summary,
    }
}

/// Collects `-` bullet lines in order, stripping the marker and one space.
/// Bullets with nothing after the marker are skipped.
fn bullet_lines(segment: &str) -> Vec<String> {
    segment
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix(BULLET))
        .map(|item| item.strip_prefix(' ').unwrap_or(item))
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}
