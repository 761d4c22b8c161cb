/// Appended to any string cut down to its character budget.
pub const TRUNCATION_MARKER: char = '\u{2026}';

/// Cut `s` to at most `budget` characters.
///
/// Strings within budget are returned unchanged (`None`); longer strings keep their first
/// `budget - 1` characters followed by [`TRUNCATION_MARKER`]. Counting is by Unicode scalar
/// value, so the operation is idempotent for any budget.
pub fn truncate_to_budget(s: &str, budget: usize) -> Option<String> {
    if s.chars().count() <= budget {
        return None;
    }
    let mut out: String = s.chars().take(budget.saturating_sub(1)).collect();
    out.push(TRUNCATION_MARKER);
    Some(out)
}

/// Break free text into list-sized fragments: line breaks first, sentence terminators second.
pub(crate) fn split_fragments(s: &str) -> Vec<String> {
    let lines: Vec<String> = s
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    if lines.len() > 1 {
        return lines;
    }
    split_sentences(s)
}

fn split_sentences(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        cur.push(c);
        let at_boundary =
            matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace());
        if at_boundary {
            push_trimmed(&mut out, &cur);
            cur.clear();
        }
    }
    push_trimmed(&mut out, &cur);
    out
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let t = s.trim();
    if !t.is_empty() {
        out.push(t.to_string());
    }
}

/// Split a delimited contact-style string (`"a | b | c"`) into its non-empty parts.
pub(crate) fn split_delimited(s: &str, delim: char) -> Vec<String> {
    s.split(delim)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/text.rs"]
mod tests;
