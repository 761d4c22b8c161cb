use std::fmt;

macro_rules! block_kinds {
    ($($variant:ident => $tag:literal),+ $(,)?) => {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        /// Closed set of content-block types a payload may describe.
        pub enum BlockKind {
            $(
                #[doc = concat!("`", $tag, "` block.")]
                $variant,
            )+
        }

        impl BlockKind {
            /// Every block kind, in canonical catalog order.
            pub const ALL: &'static [BlockKind] = &[$(BlockKind::$variant),+];

            /// Wire tag for this block kind.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(BlockKind::$variant => $tag,)+
                }
            }

            /// Parse a wire tag. Tags are matched exactly.
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(BlockKind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

block_kinds! {
    CompanyOverview => "company_overview",
    OurValues => "our_values",
    TeamLeadership => "team_leadership",
    KeyFacts => "key_facts",
    Sources => "sources",
    ExecutiveSummary => "executive_summary",
    KpiDashboard => "kpi_dashboard",
    ProcessLinear => "process_linear",
    ProcessCircular => "process_circular",
    RoadmapTimeline => "roadmap_timeline",
    SwotMatrix => "swot_matrix",
    BarChart => "bar_chart",
    LineChart => "line_chart",
    PieChart => "pie_chart",
    Comparison => "comparison",
    DataTable => "data_table",
    TwoColumn => "two_column",
    ThreeColumn => "three_column",
    HighlightQuote => "highlight_quote",
    InfographicDashboard => "infographic_dashboard",
    NextSteps => "next_steps",
    CallToAction => "call_to_action",
    FunnelDiagram => "funnel_diagram",
    PyramidHierarchy => "pyramid_hierarchy",
    VennDiagram => "venn_diagram",
    HubSpoke => "hub_spoke",
    MilestoneRoadmap => "milestone_roadmap",
    KanbanBoard => "kanban_board",
    MatrixQuadrant => "matrix_quadrant",
    GaugeDashboard => "gauge_dashboard",
    IconGrid => "icon_grid",
    RiskMatrix => "risk_matrix",
}

impl BlockKind {
    /// Name of the optional image-reference field every block accepts.
    pub fn image_field(self) -> String {
        format!("{}_image", self.as_str())
    }

    /// Name of the optional free-text layout hint field every block accepts.
    pub fn hint_field(self) -> String {
        format!("{}_layout_hint", self.as_str())
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/block.rs"]
mod tests;
