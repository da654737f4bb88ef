// Layout assembler - Fixed page structure around the built charts
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::SummaryCard;
use crate::domain::layout::{LayoutNode, TextRole};

pub const DASHBOARD_TITLE: &str = "Dashboard Komoditas Ikan Nasional";

/// Every chart of the page, already built.
#[derive(Debug)]
pub struct DashboardCharts {
    pub production_trend: ChartSpec,
    pub consumption_trend: ChartSpec,
    pub farmers_by_province: ChartSpec,
    pub species_share: ChartSpec,
    pub farmers_vs_volume: ChartSpec,
    /// Dual-donut charts with the element ids they are rendered under.
    pub donuts: Vec<(String, ChartSpec)>,
}

fn column(children: Vec<LayoutNode>) -> LayoutNode {
    LayoutNode::Column(children)
}

fn chart_column(id: &str, spec: ChartSpec) -> LayoutNode {
    column(vec![LayoutNode::chart(id, spec)])
}

fn card(summary: SummaryCard) -> LayoutNode {
    let value = summary.display_value();
    LayoutNode::Card(vec![
        LayoutNode::text(TextRole::CardTitle, summary.title),
        LayoutNode::text(TextRole::CardText, value),
    ])
}

/// Title row, card row, then the four chart rows: production and
/// consumption trends; farmers per province; species share and
/// farmers-vs-volume; the dual donuts.
pub fn assemble(cards: Vec<SummaryCard>, charts: DashboardCharts) -> LayoutNode {
    let title_row = LayoutNode::Row(vec![column(vec![LayoutNode::text(
        TextRole::Heading,
        DASHBOARD_TITLE,
    )])]);

    let card_row = LayoutNode::Row(cards.into_iter().map(card).collect());

    let trends_row = LayoutNode::Row(vec![
        chart_column("production-trend", charts.production_trend),
        chart_column("consumption-trend", charts.consumption_trend),
    ]);

    let farmers_row = LayoutNode::Row(vec![chart_column(
        "farmers-by-province",
        charts.farmers_by_province,
    )]);

    let share_row = LayoutNode::Row(vec![
        chart_column("species-share", charts.species_share),
        chart_column("farmers-vs-volume", charts.farmers_vs_volume),
    ]);

    let donut_row = LayoutNode::Row(
        charts
            .donuts
            .into_iter()
            .map(|(id, spec)| chart_column(&id, spec))
            .collect(),
    );

    LayoutNode::Page(vec![
        title_row,
        card_row,
        trends_row,
        farmers_row,
        share_row,
        donut_row,
    ])
}

/// Element id of a donut chart, e.g. `donut-bandeng-udang-total`.
pub fn donut_id(first: &str, second: &str) -> String {
    let slug = |name: &str| {
        name.split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    };
    format!("donut-{}-{}", slug(first), slug(second))
}
