use super::*;
use crate::foundation::diagnostic::DiagnosticKind;
use serde_json::json;

fn layouts() -> LayoutCatalog {
    LayoutCatalog::from_json_str(
        r#"{ "slots": [
            { "index": 0, "name": "Title 1", "title_regions": 1, "body_regions": 1 },
            { "index": 1, "name": "Content", "category": "content_text", "title_regions": 1, "body_regions": 1 },
            { "index": 2, "name": "Blank", "title_regions": 1 },
            { "index": 3, "name": "Two Columns", "category": "multi_column_2", "title_regions": 1, "body_regions": 2 }
        ] }"#,
    )
    .unwrap()
}

#[test]
fn run_assigns_blocks_in_deck_order() {
    let layouts = layouts();
    let pipeline = Pipeline::new(SchemaCatalog::standard(), &layouts, PipelineOpts::default());
    let out = pipeline.run(&json!({
        "selected_blocks": ["bar_chart", "two_column", "highlight_quote"],
        "sections": [
            { "title": "Story", "blocks": ["highlight_quote", "two_column"] },
            { "title": "Data", "blocks": ["bar_chart"] }
        ],
        "content": {
            "quote_text": "Ship small, ship often.",
            "two_col_title": "Plan",
            "col2": [{ "heading": "Now", "bullets": ["a"] }, { "heading": "Next", "bullets": ["b"] }],
            "bar_title": "Revenue",
            "bar_categories": ["Q1", "Q2", "Q3"],
            "bar_series": [{ "name": "2025", "values": [1, 2, 3] }]
        }
    }));

    let order: Vec<BlockKind> = out.assignments.iter().map(|a| a.block).collect();
    assert_eq!(
        order,
        vec![BlockKind::HighlightQuote, BlockKind::TwoColumn, BlockKind::BarChart]
    );
    let slots: Vec<Option<usize>> = out.assignments.iter().map(|a| a.slot).collect();
    assert_eq!(slots, vec![Some(1), Some(3), Some(2)]);
    assert_eq!(out.unassigned().count(), 0);
    assert!(out.selection.is_consistent());
}

#[test]
fn diagnostics_from_both_stages_are_merged() {
    let layouts = layouts();
    let pipeline = Pipeline::new(SchemaCatalog::standard(), &layouts, PipelineOpts::default());
    let out = pipeline.run(&json!({ "selected_blocks": ["nope"], "mystery": 1 }));
    assert!(!out.is_clean());
    let kinds: Vec<DiagnosticKind> = out.diagnostics.iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::UnknownKey));
    assert!(kinds.contains(&DiagnosticKind::SelectionRepaired));
    assert_eq!(out.assignments.len(), BlockKind::ALL.len());
}

#[test]
fn empty_layout_catalog_leaves_every_block_unassigned() {
    let layouts = LayoutCatalog::new(Vec::new()).unwrap();
    let pipeline = Pipeline::new(SchemaCatalog::standard(), &layouts, PipelineOpts::default());
    let out = pipeline.run(&json!({ "selected_blocks": ["pie_chart", "risk_matrix"] }));
    assert_eq!(out.unassigned().collect::<Vec<_>>(), vec![BlockKind::PieChart, BlockKind::RiskMatrix]);
}

#[test]
fn batch_matches_sequential_runs() {
    let layouts = layouts();
    let opts = PipelineOpts {
        threads: Some(2),
        ..PipelineOpts::default()
    };
    let pipeline = Pipeline::new(SchemaCatalog::standard(), &layouts, opts);
    let payloads: Vec<Value> = (0..6)
        .map(|i| json!({ "selected_blocks": ["pie_chart"], "pie_values": [i, 1, 2] }))
        .collect();
    let batch = pipeline.run_batch(&payloads).unwrap();
    let sequential: Vec<PipelineOutput> = payloads.iter().map(|p| pipeline.run(p)).collect();
    assert_eq!(batch, sequential);
}

#[test]
fn zero_threads_is_a_validation_error() {
    let layouts = layouts();
    let opts = PipelineOpts {
        threads: Some(0),
        ..PipelineOpts::default()
    };
    let pipeline = Pipeline::new(SchemaCatalog::standard(), &layouts, opts);
    let err = pipeline.run_batch(&[json!({})]).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn options_accept_partial_documents() {
    let opts: PipelineOpts = serde_json::from_str(r#"{ "assign": { "variety_window": 5 } }"#).unwrap();
    assert_eq!(opts.assign.variety_window, 5);
    assert_eq!(opts.threads, None);
    let opts: PipelineOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, PipelineOpts::default());
}
