use super::*;
use serde_json::json;

use crate::schema::block::BlockKind::{BarChart, KpiDashboard, PieChart, RiskMatrix};

fn run(raw: Value) -> (SelectionResult, Vec<Diagnostic>) {
    select(&raw, SchemaCatalog::standard())
}

#[test]
fn unassigned_blocks_get_an_additional_section() {
    let (sel, diags) = run(json!({
        "selected_blocks": ["bar_chart", "pie_chart", "risk_matrix"],
        "sections": [{ "title": "S1", "blocks": ["bar_chart", "pie_chart"] }]
    }));
    assert_eq!(sel.selected_blocks, vec![BarChart, PieChart, RiskMatrix]);
    assert_eq!(sel.sections.len(), 2);
    assert_eq!(sel.sections[0].title, "S1");
    assert_eq!(sel.sections[0].blocks, vec![BarChart, PieChart]);
    assert_eq!(sel.sections[1].title, ADDITIONAL_TITLE);
    assert_eq!(sel.sections[1].blocks, vec![RiskMatrix]);
    assert!(sel.is_consistent());
    assert!(diags.iter().any(|d| d.kind == DiagnosticKind::SectionRepaired));
}

#[test]
fn clean_envelope_produces_no_diagnostics() {
    let (sel, diags) = run(json!({
        "selected_blocks": ["kpi_dashboard", "bar_chart"],
        "sections": [
            { "title": "Numbers", "subtitle": "Q3", "blocks": ["kpi_dashboard"] },
            { "title": "Trends", "slides": ["bar_chart"] }
        ]
    }));
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(sel.sections[0].subtitle, "Q3");
    assert_eq!(sel.sections[1].subtitle, "");
    assert_eq!(sel.deck_order().collect::<Vec<_>>(), vec![KpiDashboard, BarChart]);
}

#[test]
fn selection_is_filtered_and_deduplicated() {
    let (sel, diags) = run(json!({
        "selectedBlocks": ["pie_chart", "cover", "pie_chart", 7, "bar_chart"]
    }));
    assert_eq!(sel.selected_blocks, vec![PieChart, BarChart]);
    let unknown = diags
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnknownKey)
        .count();
    assert_eq!(unknown, 2);
    assert!(
        diags
            .iter()
            .any(|d| d.kind == DiagnosticKind::SelectionRepaired && d.original == json!("pie_chart"))
    );
}

#[test]
fn missing_or_empty_selection_selects_everything() {
    let catalog = SchemaCatalog::standard();
    for raw in [json!({}), json!({ "selected_blocks": [] }), json!({ "selected_slides": ["nope"] })] {
        let (sel, diags) = run(raw);
        assert_eq!(sel.selected_blocks, catalog.block_kinds().collect::<Vec<_>>());
        assert!(diags.iter().any(|d| d.kind == DiagnosticKind::SelectionRepaired));
        assert_eq!(sel.sections.len(), 1);
        assert_eq!(sel.sections[0].title, OVERVIEW_TITLE);
        assert!(sel.is_consistent());
    }
}

#[test]
fn sections_are_filtered_against_the_selection() {
    let (sel, diags) = run(json!({
        "selected_blocks": ["bar_chart", "pie_chart"],
        "sections": [
            { "title": "Charts", "blocks": ["bar_chart", "risk_matrix", "bar_chart"] },
            { "title": "Empty", "blocks": ["risk_matrix"] },
            { "blocks": ["pie_chart", "bar_chart"] }
        ]
    }));
    assert_eq!(sel.sections.len(), 2);
    assert_eq!(sel.sections[0].blocks, vec![BarChart]);
    assert_eq!(sel.sections[1].title, "Section");
    assert_eq!(sel.sections[1].blocks, vec![PieChart]);
    assert!(sel.is_consistent());
    assert!(
        diags
            .iter()
            .any(|d| d.field == "sections[1]" && d.action.contains("no blocks"))
    );
}

#[test]
fn unusable_sections_fall_back_to_overview() {
    let (sel, _) = run(json!({
        "selected_blocks": ["risk_matrix", "bar_chart"],
        "sections": "nonsense"
    }));
    assert_eq!(sel.sections.len(), 1);
    assert_eq!(sel.sections[0].title, OVERVIEW_TITLE);
    assert_eq!(sel.sections[0].blocks, vec![RiskMatrix, BarChart]);
}

#[test]
fn restricted_catalog_limits_the_default_selection() {
    let catalog = SchemaCatalog::standard()
        .restricted_to(&[PieChart, BarChart])
        .unwrap();
    let (sel, _) = select(&json!({ "selected_blocks": ["risk_matrix"] }), &catalog);
    assert_eq!(sel.selected_blocks, vec![BarChart, PieChart]);
}

#[test]
fn consistency_check_rejects_overlaps() {
    let sel = SelectionResult {
        selected_blocks: vec![BarChart, PieChart],
        sections: vec![
            Section::synthesized("A", vec![BarChart]),
            Section::synthesized("B", vec![BarChart, PieChart]),
        ],
    };
    assert!(!sel.is_consistent());
}
