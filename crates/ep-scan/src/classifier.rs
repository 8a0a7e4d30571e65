//! Line classifier.
//!
//! The simulator log mixes two meaningful line shapes with free-form
//! decoration:
//!
//! ```text
//! 12                                   ← time marker
//! State for model _35204 is <…>        ← state record
//! [cadmium] model started              ← anything else: skipped
//! ```
//!
//! A state record needs both a region token (`_` followed by word
//! characters; leading underscores are stripped from the id) and a payload
//! (`<` … `>`, the outermost pair, comma-separated floats).  Field counts
//! are not checked here.

use ep_core::TimeStep;

/// Outcome of classifying one log line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// A bare integer different from the current time.
    TimeMarker(TimeStep),
    /// A region id and its raw state vector.
    StateRecord { region: &'a str, fields: Vec<f64> },
    /// Decoration, a repeated time marker, or a malformed record.
    Unrecognized,
}

/// Classify `line` given the time marker currently in effect.
pub fn classify(line: &str, current: Option<TimeStep>) -> LineKind<'_> {
    let line = line.trim();

    if let Some(t) = TimeStep::parse_marker(line) {
        return if current == Some(t) {
            LineKind::Unrecognized
        } else {
            LineKind::TimeMarker(t)
        };
    }

    let (Some(region), Some(payload)) = (region_token(line), payload(line)) else {
        return LineKind::Unrecognized;
    };

    match parse_fields(payload) {
        Some(fields) => LineKind::StateRecord { region, fields },
        None => {
            tracing::trace!(region, payload, "state payload is not numeric; line skipped");
            LineKind::Unrecognized
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[inline]
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// First `_<word chars>` token, leading underscores stripped.
fn region_token(line: &str) -> Option<&str> {
    for (start, c) in line.char_indices() {
        if c != '_' {
            continue;
        }
        let rest = &line[start + 1..];
        let len = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
        if len == 0 {
            continue;
        }
        let id = rest[..len].trim_start_matches('_');
        return (!id.is_empty()).then_some(id);
    }
    None
}

/// Contents between the first `<` and the last `>` after it.
fn payload(line: &str) -> Option<&str> {
    let open = line.find('<')?;
    let close = line.rfind('>')?;
    if close <= open + 1 {
        return None;
    }
    Some(line[open..=close].trim_matches(|c| c == '<' || c == '>'))
}

fn parse_fields(payload: &str) -> Option<Vec<f64>> {
    payload
        .split(',')
        .map(|f| f.trim().parse::<f64>().ok())
        .collect()
}
