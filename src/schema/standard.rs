//! The built-in schema catalog.

use serde_json::{Value, json};

use crate::schema::{
    block::BlockKind,
    catalog::{BlockSchema, DocumentField, SchemaCatalog},
    rule::{
        BucketRule, CellRule, FieldKind, FieldRole, FieldRule, GroupRule, ListBounds, ListRule,
        PadWith, PercentRule, SeriesRule,
    },
};

const SIGNAL_IMAGE_BUDGET: usize = 200;
const SIGNAL_HINT_BUDGET: usize = 60;

pub(crate) fn build() -> SchemaCatalog {
    let blocks = standard_blocks()
        .into_iter()
        .map(|(kind, description, mut fields)| {
            fields.push(text_max(&kind.image_field(), FieldRole::Image, SIGNAL_IMAGE_BUDGET));
            fields.push(text_max(&kind.hint_field(), FieldRole::Hint, SIGNAL_HINT_BUDGET));
            BlockSchema::new(kind, description, fields)
        })
        .collect();

    let aliases = ALIASES
        .iter()
        .map(|(a, c)| ((*a).to_string(), (*c).to_string()))
        .collect();

    BUDGETS.iter().fold(
        SchemaCatalog::assemble(blocks, document_fields(), aliases),
        |catalog, (field, budget)| catalog.with_budget_override(*field, *budget),
    )
}

const ALIASES: &[(&str, &str)] = &[
    ("exec_summary_title", "exec_title"),
    ("executive_summary_title", "exec_title"),
    ("exec_summary_text", "exec_bullets"),
    ("exec_summary_points", "exec_bullets"),
    ("exec_summary_bullets", "exec_bullets"),
    ("exec_summary_metrics", "exec_metrics"),
    ("kpi_cards", "kpis"),
    ("kpi_items", "kpis"),
    ("next_title", "next_steps_title"),
    ("next_items", "next_steps"),
    ("facts_items", "key_facts"),
    ("facts_title", "key_facts_title"),
    ("sources_items", "sources_list"),
    ("cta_body", "cta_subtitle"),
    ("cta_contact", "cta_contacts"),
    ("thankyou_message", "thankyou_contacts"),
    ("thankyou_contact", "thankyou_contacts"),
    ("comparison_columns", "comparison_headers"),
    ("roadmap_milestones", "milestones"),
    ("data_table_title", "table_title"),
    ("pie_segments", "pie_categories"),
];

const BUDGETS: &[(&str, usize)] = &[
    ("cover_title", 80),
    ("cover_subtitle", 120),
    ("cover_date", 50),
    ("overview_title", 50),
    ("overview_mission", 300),
    ("values_title", 50),
    ("team_title", 50),
    ("key_facts_title", 50),
    ("exec_title", 50),
    ("bar_title", 60),
    ("line_title", 60),
    ("pie_title", 60),
    ("table_title", 60),
    ("comparison_title", 60),
    ("roadmap_title", 60),
    ("swot_title", 50),
    ("infographic_title", 60),
    ("cta_subtitle", 200),
    ("next_steps_title", 60),
    ("funnel_title", 60),
    ("pyramid_title", 60),
    ("venn_title", 60),
    ("hub_title", 60),
    ("milestone_title", 60),
    ("kanban_title", 60),
    ("matrix_title", 60),
    ("gauge_title", 60),
    ("icon_grid_title", 60),
    ("risk_title", 60),
    ("hub_center", 30),
    ("venn_overlap", 60),
];

const SEVERITIES: &[&str] = &["low", "medium", "high", "critical"];

fn document_fields() -> Vec<DocumentField> {
    vec![
        DocumentField {
            rule: text("cover_title", FieldRole::Title),
            default: json!("Presentation"),
        },
        DocumentField {
            rule: text("cover_subtitle", FieldRole::Detail),
            default: json!(""),
        },
        DocumentField {
            rule: text("cover_date", FieldRole::Detail),
            default: json!("2026  |  Confidential"),
        },
        DocumentField {
            rule: contact_rows(fixed_rows(
                "thankyou_contacts",
                FieldRole::Detail,
                4,
                json!(["", "", ""]),
                vec![t(30), t(40), t(50)],
            )),
            default: json!([
                ["Email", "contact@company.com", "\u{2709}"],
                ["Phone", "+1 (555) 123-4567", "\u{260E}"],
                ["Website", "www.company.com", "\u{2302}"],
                ["Location", "", "\u{2691}"],
            ]),
        },
    ]
}

type BlockDef = (BlockKind, &'static str, Vec<FieldRule>);

fn standard_blocks() -> Vec<BlockDef> {
    use FieldRole::{Body, Columns, Detail, Graphic};
    vec![
        (
            BlockKind::CompanyOverview,
            "Company mission statement and 4 quick facts",
            vec![
                title("overview_title"),
                text("overview_mission", Body),
                fixed_rows("overview_facts", Detail, 4, json!(["", ""]), vec![t(25), t(20)]),
            ],
        ),
        (
            BlockKind::OurValues,
            "4 core company values with descriptions",
            vec![
                title("values_title"),
                fixed_rows("values", Columns, 4, json!(["", ""]), vec![t(30), t(120)]),
            ],
        ),
        (
            BlockKind::TeamLeadership,
            "Leadership team: 4 executives with names, titles, bios",
            vec![
                title("team_title"),
                fixed_rows("team", Columns, 4, json!(["", "", ""]), vec![t(30), t(40), t(80)]),
            ],
        ),
        (
            BlockKind::KeyFacts,
            "6 big headline statistics in large font",
            vec![
                title("key_facts_title"),
                fixed_rows("key_facts", Graphic, 6, json!(["", ""]), vec![t(15), t(30)]),
            ],
        ),
        (
            BlockKind::Sources,
            "Bibliography slide with 4-8 cited sources",
            vec![
                title("sources_title"),
                splitting(ranged_items(
                    "sources_list",
                    Body,
                    (4, 8),
                    PadWith::Boilerplate {
                        text: "Source to be confirmed".into(),
                    },
                    t(200),
                )),
            ],
        ),
        (
            BlockKind::ExecutiveSummary,
            "5 takeaway bullets plus 3 headline metrics",
            vec![
                title("exec_title"),
                splitting(fixed_items("exec_bullets", Body, 5, json!(""), t(150))),
                fixed_rows("exec_metrics", Detail, 3, json!(["", ""]), vec![t(15), t(25)]),
            ],
        ),
        (
            BlockKind::KpiDashboard,
            "4-KPI dashboard with values, trends, and progress bars",
            vec![
                title("kpi_title"),
                fixed_rows(
                    "kpis",
                    Graphic,
                    4,
                    json!(["KPI", "0", "0%", 0.5, "\u{2191}"]),
                    vec![t(25), t(15), t(10), CellRule::unit(), t(5)],
                ),
            ],
        ),
        (
            BlockKind::ProcessLinear,
            "5-step left-to-right process flow",
            vec![
                title("process_title"),
                fixed_rows("process_steps", Graphic, 5, json!(["Step", ""]), vec![t(30), t(100)]),
            ],
        ),
        (
            BlockKind::ProcessCircular,
            "4-phase cycle diagram",
            vec![
                title("cycle_title"),
                fixed_items("cycle_phases", Graphic, 4, json!("Phase"), t(30)),
            ],
        ),
        (
            BlockKind::RoadmapTimeline,
            "5-milestone roadmap",
            vec![
                title("roadmap_title"),
                fixed_rows(
                    "milestones",
                    Graphic,
                    5,
                    json!(["Q1 2026", "Milestone", ""]),
                    vec![t(15), t(30), t(80)],
                ),
            ],
        ),
        (
            BlockKind::SwotMatrix,
            "SWOT analysis: 4 quadrants, 3 items each",
            vec![
                title("swot_title"),
                FieldRule::new(
                    "swot",
                    Graphic,
                    FieldKind::Buckets(BucketRule {
                        names: ["strengths", "weaknesses", "opportunities", "threats"]
                            .map(String::from)
                            .to_vec(),
                        len: 3,
                        budget: Some(76),
                    }),
                ),
            ],
        ),
        (
            BlockKind::BarChart,
            "Grouped bar chart with 3-8 categories and 1-4 series",
            vec![
                title("bar_title"),
                categories("bar_categories"),
                series("bar_series", "bar_categories", 3, (1, 4)),
            ],
        ),
        (
            BlockKind::LineChart,
            "Line chart with 3-8 periods and 1-4 series",
            vec![
                title("line_title"),
                categories("line_categories"),
                series("line_series", "line_categories", 3, (1, 4)),
            ],
        ),
        (
            BlockKind::PieChart,
            "Pie chart with 3-8 segments summing to 100",
            vec![
                title("pie_title"),
                ranged_items(
                    "pie_categories",
                    Detail,
                    (3, 8),
                    PadWith::Numbered {
                        prefix: "Other".into(),
                    },
                    CellRule::text(),
                ),
                FieldRule::new(
                    "pie_values",
                    Graphic,
                    FieldKind::Percentages(PercentRule {
                        labels: "pie_categories".into(),
                        legend: Some("pie_legend".into()),
                        min: 3,
                        max: 8,
                        label_prefix: "Other".into(),
                    }),
                ),
                ranged_items(
                    "pie_legend",
                    Detail,
                    (3, 8),
                    PadWith::Numbered {
                        prefix: "Segment".into(),
                    },
                    CellRule::text(),
                ),
            ],
        ),
        (
            BlockKind::Comparison,
            "Side-by-side comparison of 2 options across 6 metrics",
            vec![
                title("comparison_title"),
                fixed_items("comparison_headers", Detail, 2, json!("Option"), CellRule::text()),
                fixed_rows(
                    "comparison_rows",
                    Graphic,
                    6,
                    json!(["Metric", "", ""]),
                    vec![t(25), t(25), t(25)],
                ),
            ],
        ),
        (
            BlockKind::DataTable,
            "5-column data table with 6 rows",
            vec![
                title("table_title"),
                fixed_items("table_headers", Detail, 5, json!("Column"), CellRule::text()),
                fixed_rows(
                    "table_rows",
                    Graphic,
                    6,
                    json!(["", "", "", "", ""]),
                    vec![CellRule::text(); 5],
                ),
                fixed_items("table_col_widths", Detail, 5, json!(1.2), CellRule::number(1.2)),
            ],
        ),
        (
            BlockKind::TwoColumn,
            "Intro text and approach bullets beside 2 themed sections",
            vec![
                title("two_col_title"),
                text("approach_intro", Body),
                splitting(fixed_items("approach_bullets", Body, 5, json!(""), t(150))),
                FieldRule::new(
                    "col2",
                    Columns,
                    FieldKind::Groups(GroupRule {
                        len: 2,
                        label_key: "heading".into(),
                        label_default: "Section".into(),
                        items_key: "bullets".into(),
                        items_len: Some(4),
                        item_budget: None,
                    }),
                ),
            ],
        ),
        (
            BlockKind::ThreeColumn,
            "Three pillars or focus areas",
            vec![
                title("pillars_title"),
                fixed_rows("pillars", Columns, 3, json!(["Pillar", ""]), vec![t(30), t(120)]),
            ],
        ),
        (
            BlockKind::HighlightQuote,
            "Full-slide quote with attribution",
            vec![
                text("quote_text", Body),
                text("quote_attribution", Detail),
                text("quote_source", Detail),
            ],
        ),
        (
            BlockKind::InfographicDashboard,
            "3 KPIs, a mini bar chart and 4 progress bars",
            vec![
                title("infographic_title"),
                fixed_rows("infographic_kpis", Graphic, 3, json!(["0", ""]), vec![t(15), t(25)]),
                text("infographic_chart_title", Detail),
                fixed_items("infographic_chart_cats", Detail, 4, json!("Q1"), CellRule::text()),
                series("infographic_chart_series", "infographic_chart_cats", 4, (2, 2)),
                fixed_rows(
                    "infographic_progress",
                    Graphic,
                    4,
                    json!(["Phase", 0.5]),
                    vec![t(30), CellRule::unit()],
                ),
            ],
        ),
        (
            BlockKind::NextSteps,
            "4 action items with owner and due date",
            vec![
                title("next_steps_title"),
                splitting(fixed_rows(
                    "next_steps",
                    Body,
                    4,
                    json!(["Action", "", "", ""]),
                    vec![t(40), t(80), t(25), t(25)],
                )),
            ],
        ),
        (
            BlockKind::CallToAction,
            "Bold call-to-action headline with contact details",
            vec![
                title("cta_headline"),
                text("cta_subtitle", Body),
                contact_rows(fixed_rows(
                    "cta_contacts",
                    Detail,
                    3,
                    json!(["", ""]),
                    vec![t(40), t(60)],
                )),
            ],
        ),
        (
            BlockKind::FunnelDiagram,
            "Conversion funnel with progressive narrowing",
            vec![
                title("funnel_title"),
                ranged_rows("funnel_stages", (3, 6), "Stage", vec![t(30), t(15), t(80)]),
            ],
        ),
        (
            BlockKind::PyramidHierarchy,
            "Layered pyramid, narrow top to wide bottom",
            vec![
                title("pyramid_title"),
                ranged_rows("pyramid_layers", (3, 6), "Layer", vec![t(30), t(120)]),
            ],
        ),
        (
            BlockKind::VennDiagram,
            "2-3 overlapping circles showing synergies",
            vec![
                title("venn_title"),
                ranged_rows("venn_sets", (2, 3), "Set", vec![t(25), t(100)]),
                text("venn_overlap", Detail),
            ],
        ),
        (
            BlockKind::HubSpoke,
            "Central hub with 4-6 radiating spokes",
            vec![
                title("hub_title"),
                text("hub_center", Detail),
                ranged_rows("hub_spokes", (4, 6), "Spoke", vec![t(25), t(80)]),
            ],
        ),
        (
            BlockKind::MilestoneRoadmap,
            "5-7 dated milestones on a timeline path",
            vec![
                title("milestone_title"),
                ranged_rows("milestone_items", (5, 7), "Milestone", vec![t(15), t(30), t(80)]),
            ],
        ),
        (
            BlockKind::KanbanBoard,
            "3-column kanban board with task cards",
            vec![
                title("kanban_title"),
                FieldRule::new(
                    "kanban_columns",
                    Columns,
                    FieldKind::Groups(GroupRule {
                        len: 3,
                        label_key: "title".into(),
                        label_default: "Column".into(),
                        items_key: "cards".into(),
                        items_len: None,
                        item_budget: Some(60),
                    }),
                ),
            ],
        ),
        (
            BlockKind::MatrixQuadrant,
            "2x2 matrix with labelled axes",
            vec![
                title("matrix_title"),
                text("matrix_x_axis", Detail),
                text("matrix_y_axis", Detail),
                fixed_rows(
                    "matrix_quadrants",
                    Graphic,
                    4,
                    json!(["Quadrant", ""]),
                    vec![t(30), t(120)],
                ),
            ],
        ),
        (
            BlockKind::GaugeDashboard,
            "3-4 donut gauges showing progress toward targets",
            vec![
                title("gauge_title"),
                ranged_rows("gauges", (3, 4), "Gauge", vec![t(25), t(15), CellRule::unit()]),
            ],
        ),
        (
            BlockKind::IconGrid,
            "4-6 icon and text cards",
            vec![
                title("icon_grid_title"),
                ranged_rows("icon_grid_items", (4, 6), "Item", vec![t(20), t(25), t(80)]),
            ],
        ),
        (
            BlockKind::RiskMatrix,
            "Risk assessment grid with severity-coded items",
            vec![
                title("risk_title"),
                text("risk_x_label", Detail),
                text("risk_y_label", Detail),
                ranged_rows(
                    "risk_items",
                    (4, 6),
                    "Risk",
                    vec![
                        t(30),
                        CellRule::choice(SEVERITIES, "medium").with_budget(10),
                        t(80),
                    ],
                ),
            ],
        ),
    ]
}

fn t(budget: usize) -> CellRule {
    CellRule::text_max(budget)
}

fn text(name: &str, role: FieldRole) -> FieldRule {
    FieldRule::new(name, role, FieldKind::Text { budget: None })
}

fn text_max(name: &str, role: FieldRole, budget: usize) -> FieldRule {
    FieldRule::new(
        name,
        role,
        FieldKind::Text {
            budget: Some(budget),
        },
    )
}

fn title(name: &str) -> FieldRule {
    text(name, FieldRole::Title)
}

fn fixed_items(name: &str, role: FieldRole, len: usize, default: Value, cell: CellRule) -> FieldRule {
    list(name, role, ListBounds::Exact { len }, None, vec![cell], PadWith::Item { item: default })
}

fn fixed_rows(
    name: &str,
    role: FieldRole,
    len: usize,
    default: Value,
    cells: Vec<CellRule>,
) -> FieldRule {
    let width = Some(cells.len());
    list(name, role, ListBounds::Exact { len }, width, cells, PadWith::Item { item: default })
}

fn ranged_items(
    name: &str,
    role: FieldRole,
    (min, max): (usize, usize),
    pad: PadWith,
    cell: CellRule,
) -> FieldRule {
    list(name, role, ListBounds::Range { min, max }, None, vec![cell], pad)
}

fn ranged_rows(name: &str, (min, max): (usize, usize), label: &str, cells: Vec<CellRule>) -> FieldRule {
    let width = Some(cells.len());
    list(
        name,
        FieldRole::Graphic,
        ListBounds::Range { min, max },
        width,
        cells,
        PadWith::Numbered {
            prefix: label.to_string(),
        },
    )
}

fn categories(name: &str) -> FieldRule {
    ranged_items(
        name,
        FieldRole::Detail,
        (3, 8),
        PadWith::Numbered {
            prefix: "Category".into(),
        },
        CellRule::text(),
    )
}

fn series(name: &str, categories: &str, min_categories: usize, (lo, hi): (usize, usize)) -> FieldRule {
    FieldRule::new(
        name,
        FieldRole::Graphic,
        FieldKind::Series(SeriesRule {
            categories: categories.to_string(),
            min_categories,
            min_series: lo,
            max_series: hi,
        }),
    )
}

fn list(
    name: &str,
    role: FieldRole,
    bounds: ListBounds,
    width: Option<usize>,
    cells: Vec<CellRule>,
    pad: PadWith,
) -> FieldRule {
    FieldRule::new(
        name,
        role,
        FieldKind::List(ListRule {
            bounds,
            width,
            cells,
            pad,
            split_text: false,
            lone_label: None,
        }),
    )
}

fn contact_rows(mut rule: FieldRule) -> FieldRule {
    if let FieldKind::List(list) = &mut rule.kind {
        list.lone_label = Some("Contact".to_string());
    }
    rule
}

fn splitting(mut rule: FieldRule) -> FieldRule {
    if let FieldKind::List(list) = &mut rule.kind {
        list.split_text = true;
    }
    rule
}
