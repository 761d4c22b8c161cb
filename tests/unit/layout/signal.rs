use super::*;
use crate::coerce::engine::coerce;
use crate::schema::block::BlockKind;
use crate::schema::catalog::SchemaCatalog;
use serde_json::json;

fn signal_of(kind: BlockKind, raw: serde_json::Value) -> ContentSignal {
    let catalog = SchemaCatalog::standard();
    let (content, _) = coerce(&raw, catalog);
    ContentSignal::from_content(catalog.get(kind).unwrap(), &content)
}

#[test]
fn chart_blocks_are_graphic() {
    let s = signal_of(
        BlockKind::BarChart,
        json!({
            "bar_title": "Revenue",
            "bar_categories": ["A", "B", "C"],
            "bar_series": [{ "name": "2025", "values": [1, 2, 3] }]
        }),
    );
    assert!(s.has_title);
    assert!(s.has_graphic);
    assert!(!s.has_body);
    assert_eq!(s.kind(), SignalKind::Graphic);
}

#[test]
fn column_fields_count_their_items() {
    let s = signal_of(BlockKind::TwoColumn, json!({ "col2": { "Plan": ["a"], "Run": ["b"] } }));
    assert_eq!(s.columns, 2);
    assert_eq!(s.kind(), SignalKind::Columns(2));

    let s = signal_of(
        BlockKind::ThreeColumn,
        json!({ "pillars": [["Speed", ""], ["Scale", ""], ["Safety", ""]] }),
    );
    assert_eq!(s.kind(), SignalKind::Columns(3));
}

#[test]
fn text_and_title_only_blocks() {
    let s = signal_of(BlockKind::HighlightQuote, json!({ "quote_text": "Less is more." }));
    assert_eq!(s.kind(), SignalKind::TextBody);

    let s = signal_of(BlockKind::KanbanBoard, json!({ "kanban_title": "Board" }));
    assert_eq!(s.kind(), SignalKind::TitleOnly);
}

#[test]
fn image_and_hint_fields_feed_the_signal() {
    let s = signal_of(
        BlockKind::PieChart,
        json!({
            "pie_title": "Share",
            "pie_chart_image": "assets/pie.png",
            "pie_chart_layout_hint": "  Image Right "
        }),
    );
    assert!(s.has_image);
    assert_eq!(s.hint.as_deref(), Some("Image Right"));
    assert_eq!(s.kind(), SignalKind::ImageLed);
}

#[test]
fn blank_and_absent_fields_do_not_count() {
    let s = signal_of(BlockKind::HighlightQuote, json!({ "quote_text": "   " }));
    assert_eq!(s, ContentSignal::default());
    assert_eq!(s.kind(), SignalKind::Graphic);
}
