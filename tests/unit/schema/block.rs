use super::*;

#[test]
fn tags_round_trip_through_from_tag() {
    for &kind in BlockKind::ALL {
        assert_eq!(BlockKind::from_tag(kind.as_str()), Some(kind));
    }
    assert_eq!(BlockKind::ALL.len(), 32);
}

#[test]
fn unknown_and_cased_tags_are_rejected() {
    assert_eq!(BlockKind::from_tag("Bar_Chart"), None);
    assert_eq!(BlockKind::from_tag("cover"), None);
    assert_eq!(BlockKind::from_tag(""), None);
}

#[test]
fn serde_uses_wire_tags() {
    let s = serde_json::to_string(&BlockKind::RiskMatrix).unwrap();
    assert_eq!(s, "\"risk_matrix\"");
    let k: BlockKind = serde_json::from_str("\"hub_spoke\"").unwrap();
    assert_eq!(k, BlockKind::HubSpoke);
}

#[test]
fn signal_field_names_are_prefixed_by_tag() {
    assert_eq!(BlockKind::BarChart.image_field(), "bar_chart_image");
    assert_eq!(BlockKind::BarChart.hint_field(), "bar_chart_layout_hint");
}
