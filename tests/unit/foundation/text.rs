use super::*;

#[test]
fn short_strings_are_left_alone() {
    assert_eq!(truncate_to_budget("Hello", 10), None);
    assert_eq!(truncate_to_budget("0123456789", 10), None);
    assert_eq!(truncate_to_budget("", 0), None);
}

#[test]
fn long_strings_end_in_marker_and_fit_budget() {
    let out = truncate_to_budget("Hello World Extra", 10).unwrap();
    assert_eq!(out.chars().count(), 10);
    assert_eq!(out, "Hello Wor\u{2026}");
    assert!(out.ends_with(TRUNCATION_MARKER));
}

#[test]
fn truncation_is_idempotent() {
    let once = truncate_to_budget("Hello World Extra", 10).unwrap();
    assert_eq!(truncate_to_budget(&once, 10), None);
}

#[test]
fn budget_counts_chars_not_bytes() {
    let s = "\u{00e9}\u{00e9}\u{00e9}\u{00e9}";
    assert_eq!(truncate_to_budget(s, 4), None);
    assert_eq!(
        truncate_to_budget(s, 3).unwrap(),
        "\u{00e9}\u{00e9}\u{2026}"
    );
}

#[test]
fn paragraphs_split_on_sentence_terminators() {
    let parts = split_fragments("Revenue grew. Margins held!  Is churn down? yes");
    assert_eq!(
        parts,
        vec!["Revenue grew.", "Margins held!", "Is churn down?", "yes"]
    );
}

#[test]
fn line_breaks_take_precedence_over_sentences() {
    let parts = split_fragments("First line. Still first\n\nSecond line");
    assert_eq!(parts, vec!["First line. Still first", "Second line"]);
}

#[test]
fn decimals_do_not_split() {
    assert_eq!(split_fragments("Up 4.5% year over year."), vec![
        "Up 4.5% year over year."
    ]);
}

#[test]
fn delimited_parts_are_trimmed() {
    assert_eq!(split_delimited(" a | b ||c ", '|'), vec!["a", "b", "c"]);
}
