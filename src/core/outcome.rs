/// Outcome block parsing — splits continuation text into an intro and
/// die-range branches.
///
/// Grammar, scanned left to right:
/// - a marker is `N:` or `N-M:` where `N`, `M` are ASCII digit runs;
/// - a branch is a marker, optional whitespace, then at least one non-colon
///   character, ending right before the next marker (whitespace allowed in
///   between) or at the end of the text;
/// - the intro is everything before the first marker.
///
/// Branch text cannot contain a colon. A marker whose branch runs into a
/// stray colon yields no branch, and scanning resumes one character later.

use crate::schema::outcome::{OutcomeRange, ParsedBlock};

/// A marker recognized at some position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    low: u32,
    high: u32,
    /// Index just past the colon.
    end: usize,
}

/// Parse raw continuation text into an intro and ordered outcome ranges.
///
/// Never fails: text without markers comes back as a trimmed intro with no
/// outcomes.
pub fn parse(raw: &str) -> ParsedBlock {
    let chars: Vec<char> = raw.chars().collect();

    let first_marker = (0..chars.len()).find(|&i| marker_at(&chars, i).is_some());
    let intro = match first_marker {
        Some(i) => chars[..i].iter().collect::<String>().trim().to_string(),
        None => raw.trim().to_string(),
    };

    let mut outcomes = Vec::new();
    let mut pos = first_marker.unwrap_or(chars.len());
    while pos < chars.len() {
        match branch_at(&chars, pos) {
            Some((range, end)) => {
                tracing::trace!(
                    low = range.low,
                    high = range.high,
                    outcome = %range.outcome,
                    "outcome branch"
                );
                outcomes.push(range);
                pos = end;
            }
            None => pos += 1,
        }
    }

    ParsedBlock { intro, outcomes }
}

/// Try to read `N:` or `N-M:` starting exactly at `pos`.
fn marker_at(chars: &[char], pos: usize) -> Option<Marker> {
    let (low, mut i) = digits_at(chars, pos)?;

    if chars.get(i) == Some(&'-') {
        if let Some((high, after)) = digits_at(chars, i + 1) {
            if chars.get(after) == Some(&':') {
                return Some(Marker {
                    low,
                    high,
                    end: after + 1,
                });
            }
        }
        return None;
    }

    if chars.get(i) == Some(&':') {
        i += 1;
        return Some(Marker { low, high: low, end: i });
    }
    None
}

/// Read a maximal run of ASCII digits. Values too large for `u32` saturate.
fn digits_at(chars: &[char], pos: usize) -> Option<(u32, usize)> {
    let mut end = pos;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == pos {
        return None;
    }
    let value = chars[pos..end]
        .iter()
        .fold(0u32, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0))
        });
    Some((value, end))
}

/// Whether a branch's text may stop at `pos`: the text ends here, or only
/// whitespace separates `pos` from the next marker.
fn branch_ends_at(chars: &[char], pos: usize) -> bool {
    if pos == chars.len() {
        return true;
    }
    let mut i = pos;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    marker_at(chars, i).is_some()
}

/// Try to read a full branch starting at `pos`. Returns the range and the
/// index where scanning continues.
fn branch_at(chars: &[char], pos: usize) -> Option<(OutcomeRange, usize)> {
    let marker = marker_at(chars, pos)?;

    let mut ws_end = marker.end;
    while ws_end < chars.len() && chars[ws_end].is_whitespace() {
        ws_end += 1;
    }

    // Prefer skipping all leading whitespace; give some back only when the
    // branch would otherwise be empty.
    for start in (marker.end..=ws_end).rev() {
        let mut end = start;
        while end < chars.len() && chars[end] != ':' {
            end += 1;
            if branch_ends_at(chars, end) {
                let text: String = chars[start..end].iter().collect();
                let range = OutcomeRange::new(marker.low, marker.high, text.trim());
                return Some((range, end));
            }
        }
    }
    None
}
