//! Inline chord marker format.
//!
//! A marker is the chord label wrapped in braces (`{Am}`) and spliced into the
//! word text at a character offset, e.g. `wo{G}rld`. Labels and word text must
//! not contain braces themselves; the aligner rejects such input.

pub const OPEN: char = '{';
pub const CLOSE: char = '}';

/// A chord marker extracted from rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub label: String,
    /// Rendered text with the marker span removed.
    pub text: String,
}

/// A marker together with the character offset it sits at in the base word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedMarker {
    pub offset: usize,
    pub label: String,
}

/// Wrap a chord label in marker braces.
pub fn format_marker(label: &str) -> String {
    format!("{OPEN}{label}{CLOSE}")
}

pub fn contains_brace(s: &str) -> bool {
    s.contains([OPEN, CLOSE])
}

/// Byte offset of the `char_index`-th character, clamped to the end of `text`.
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Insert `{label}` markers into `text` at character offsets.
///
/// `placements` is given in first-come order. Offsets refer to the unmodified
/// text and are applied right-to-left, so each insertion leaves the offsets of
/// those still pending valid. Placements sharing an offset keep their
/// first-come order left-to-right.
pub fn insert_markers(text: &str, placements: &[(usize, &str)]) -> String {
    let mut order: Vec<usize> = (0..placements.len()).collect();
    order.sort_by(|&a, &b| placements[b].0.cmp(&placements[a].0).then(b.cmp(&a)));

    let extra: usize = placements.iter().map(|(_, label)| label.len() + 2).sum();
    let mut rendered = String::with_capacity(text.len() + extra);
    rendered.push_str(text);

    for i in order {
        let (char_index, label) = placements[i];
        rendered.insert_str(byte_offset(text, char_index), &format_marker(label));
    }
    rendered
}

/// Extract the chord from rendered text using the last-brace rule.
///
/// The label is whatever sits between the last `{` and the last `}`; the
/// remaining text is everything outside that span. Returns `None` when the
/// text has no well-ordered brace pair.
pub fn split_marker(rendered: &str) -> Option<Marker> {
    let open = rendered.rfind(OPEN)?;
    let close = rendered.rfind(CLOSE)?;
    if close < open {
        return None;
    }

    let mut text = String::with_capacity(rendered.len());
    text.push_str(&rendered[..open]);
    text.push_str(&rendered[close + CLOSE.len_utf8()..]);

    Some(Marker {
        label: rendered[open + OPEN.len_utf8()..close].to_string(),
        text,
    })
}

/// Split rendered text into its base word and every marker, left to right.
///
/// An unterminated `{` is kept as literal text.
pub fn parse_markers(rendered: &str) -> (String, Vec<PlacedMarker>) {
    let mut base = String::with_capacity(rendered.len());
    let mut markers = Vec::new();
    let mut base_chars = 0;
    let mut rest = rendered;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len_utf8()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };

        let before = &rest[..open];
        base.push_str(before);
        base_chars += before.chars().count();
        markers.push(PlacedMarker {
            offset: base_chars,
            label: after_open[..close].to_string(),
        });
        rest = &after_open[close + CLOSE.len_utf8()..];
    }
    base.push_str(rest);

    (base, markers)
}

/// Remove every marker, giving back the original word text.
pub fn strip_markers(rendered: &str) -> String {
    parse_markers(rendered).0
}
