//! Splits a model reply into narrative text and competitor records.
//!
//! The reply is expected to end with a block fenced by [`DATA_START`] and
//! [`DATA_END`] holding `Name|Rating|ReviewCount` lines (see
//! [`crate::prompt`]). The model does not always comply, so nothing here
//! fails: a missing block yields no competitors, a bad line is skipped and a
//! bad number becomes 0.
//!
//! Only the first complete block is parsed. Every sentinel, including those of
//! later blocks and of a block the model never closed, is stripped from the
//! narrative so the parser's syntax never reaches the reader.

use std::borrow::Cow;

use crate::analysis::{AnalysisOutcome, CompetitorRecord, GroundingReference};
use crate::prompt::{DATA_END, DATA_START};

/// Narrative used when the model returned no text at all.
pub const FALLBACK_NARRATIVE: &str = "Unable to generate the analysis.";

/// Byte span of the first complete data block within the reply.
struct DataBlock<'a> {
    /// Offset of the opening sentinel.
    start: usize,
    /// Offset just past the closing sentinel.
    end: usize,
    /// Text strictly between the two sentinels.
    body: &'a str,
}

/// Builds the [`AnalysisOutcome`] for one model reply.
///
/// `grounding` is carried through unchanged. Blank replies produce
/// [`FALLBACK_NARRATIVE`] and no competitors.
#[must_use]
pub fn extract_outcome(raw_text: &str, grounding: Vec<GroundingReference>) -> AnalysisOutcome {
    if raw_text.trim().is_empty() {
        return AnalysisOutcome::new(FALLBACK_NARRATIVE.to_string(), Vec::new(), grounding);
    }

    let (competitors, narrative) = match locate_block(raw_text) {
        Some(block) => {
            let competitors = parse_data_segment(block.body);
            let mut remaining = String::with_capacity(raw_text.len());
            remaining.push_str(&raw_text[..block.start]);
            remaining.push_str(&raw_text[block.end..]);
            let narrative = scrub_markers(&remaining).trim().to_string();
            (competitors, narrative)
        }
        None => {
            // No complete block: the text stands as written unless a stray
            // sentinel had to be cut out of it.
            let narrative = match scrub_markers(raw_text) {
                Cow::Borrowed(text) => text.to_string(),
                Cow::Owned(text) => text.trim().to_string(),
            };
            (Vec::new(), narrative)
        }
    };

    tracing::debug!(
        competitors = competitors.len(),
        grounding = grounding.len(),
        "extracted analysis outcome"
    );

    AnalysisOutcome::new(narrative, competitors, grounding)
}

/// Parses the text between the sentinels into competitor records.
///
/// Lines are trimmed, blank lines skipped, and records keep the order the
/// lines appeared in. Duplicates are kept.
#[must_use]
pub fn parse_data_segment(segment: &str) -> Vec<CompetitorRecord> {
    segment
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_competitor_line)
        .collect()
}

/// Parses one `Name|Rating|ReviewCount` line.
///
/// Returns `None` when the line has no `|` or the name is blank. The rating
/// and review count fall back to 0; fields past the third are ignored.
#[must_use]
pub fn parse_competitor_line(line: &str) -> Option<CompetitorRecord> {
    let mut fields = line.split('|');
    let name = fields.next()?.trim();
    let rating_field = fields.next()?;
    if name.is_empty() {
        return None;
    }

    Some(CompetitorRecord {
        name: name.to_string(),
        rating: parse_rating(rating_field.trim()),
        reviews: fields.next().map_or(0, parse_review_count),
    })
}

fn locate_block(text: &str) -> Option<DataBlock<'_>> {
    let start = text.find(DATA_START)?;
    let body_start = start + DATA_START.len();
    let body_len = text[body_start..].find(DATA_END)?;
    let body_end = body_start + body_len;

    Some(DataBlock {
        start,
        end: body_end + DATA_END.len(),
        body: &text[body_start..body_end],
    })
}

/// Removes any remaining sentinel syntax from narrative text.
///
/// Complete blocks are cut out whole, an unclosed block is cut from its
/// opening sentinel to the end, and orphan closing sentinels are dropped.
/// Borrows when there is nothing to remove.
fn scrub_markers(text: &str) -> Cow<'_, str> {
    if !text.contains(DATA_START) && !text.contains(DATA_END) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(DATA_START) {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + DATA_START.len()..];
        let Some(close) = after_open.find(DATA_END) else {
            rest = "";
            break;
        };
        rest = &after_open[close + DATA_END.len()..];
    }
    out.push_str(rest);

    Cow::Owned(out.replace(DATA_END, ""))
}

/// Reads the leading decimal number of a rating field, 0 if there is none.
///
/// `"4.5"`, `"4.5/5"` and `"4.5 stars"` all read as 4.5; `"N/A"` reads as 0.
fn parse_rating(field: &str) -> f64 {
    leading_number(field)
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .unwrap_or(0.0)
}

/// Returns the longest prefix of `s` shaped like `[+-]digits[.digits]`, or
/// `""` when `s` does not start with a number.
fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_digit = false;
    let mut seen_dot = false;

    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if seen_digit {
        &s[..end]
    } else {
        ""
    }
}

/// Keeps only the digits of a review-count field: `"1,234 reviews"` is 1234.
fn parse_review_count(field: &str) -> u64 {
    let digits: String = field.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
