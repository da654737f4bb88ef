// Chart builder - Pure mappings from aggregated tables to plotly figures
use crate::application::aggregator::{
    rank_provinces_by_species, species_by_province, EXCLUDED_SPECIES, PROVINCE, VOLUME,
};
use crate::domain::chart::{ChartKind, ChartSpec};
use crate::domain::error::Result;
use crate::domain::table::Table;
use crate::infrastructure::config::DonutChartConfig;
use plotly::common::{Domain, Font, Mode, Position, Title};
use plotly::layout::{Annotation, Axis};
use plotly::{Bar, Layout, Pie, Plot, Scatter};
use polars::prelude::{col, lit};

/// Year range quoted in the per-species production bar title.
pub const PRODUCTION_YEAR_RANGE: &str = "2003- 2012";

const DONUT_HOLE: f64 = 0.4;
const DONUT_DOMAINS: [[f64; 2]; 2] = [[0.0, 0.45], [0.55, 1.0]];
const PIE_TEXT_INFO: &str = "percent+label";
const TREND_NAME: &str = "OLS trendline";

#[derive(Debug, Clone)]
pub struct LineChartConfig<'a> {
    pub title: &'a str,
    pub x: &'a str,
    pub y: &'a str,
    /// Column whose labels split the rows into one line each.
    pub color: Option<&'a str>,
    pub x_title: &'a str,
    pub y_title: &'a str,
}

fn titled_layout(title: &str) -> Layout {
    Layout::new().title(Title::from(title))
}

fn axes_layout(title: &str, x_title: &str, y_title: &str) -> Layout {
    titled_layout(title)
        .x_axis(Axis::new().title(Title::from(x_title)))
        .y_axis(Axis::new().title(Title::from(y_title)))
}

/// One line per distinct `color` label, in order of first appearance.
pub fn line_chart(table: &Table, config: &LineChartConfig<'_>) -> Result<ChartSpec> {
    let xs = table.plot_values(config.x)?;
    let ys = table.float_values(config.y)?;
    let groups = match config.color {
        Some(color) => table.text_values(color)?,
        None => vec![None; table.len()],
    };

    let mut lines: Vec<(Option<String>, Vec<serde_json::Value>, Vec<Option<f64>>)> = Vec::new();
    for ((group, x), y) in groups.into_iter().zip(xs).zip(ys) {
        match lines.iter_mut().find(|(name, _, _)| *name == group) {
            Some((_, line_x, line_y)) => {
                line_x.push(x);
                line_y.push(y);
            }
            None => lines.push((group, vec![x], vec![y])),
        }
    }

    let mut plot = Plot::new();
    for (name, x, y) in lines {
        let trace = Scatter::new(x, y).mode(Mode::Lines);
        match name {
            Some(name) => plot.add_trace(trace.name(name.as_str())),
            None => plot.add_trace(trace),
        }
    }
    plot.set_layout(axes_layout(config.title, config.x_title, config.y_title));
    Ok(ChartSpec::new(ChartKind::Line, config.title, plot))
}

/// One bar per row, ordered by `y` descending (stable on ties).
pub fn bar_chart(
    table: &Table,
    x: &str,
    y: &str,
    title: &str,
    x_title: &str,
    y_title: &str,
) -> Result<ChartSpec> {
    let sorted = table.sorted_descending_by(y)?;
    let mut plot = Plot::new();
    plot.add_trace(Bar::new(sorted.plot_values(x)?, sorted.float_values(y)?));
    plot.set_layout(axes_layout(title, x_title, y_title));
    Ok(ChartSpec::new(ChartKind::Bar, title, plot))
}

/// Provinces ranked by one species' mean production.
pub fn production_bar_chart(by_province_and_species: &Table, species: &str) -> Result<ChartSpec> {
    let ranked = rank_provinces_by_species(by_province_and_species, species)?;
    let title = format!("Rata-rata Produksi {} Tahun {}", species, PRODUCTION_YEAR_RANGE);
    bar_chart(&ranked, PROVINCE, VOLUME, &title, " ", " Volume")
}

/// Share of each `label` in `value`. Excluded species never become slices.
pub fn pie_chart(means: &Table, label: &str, value: &str, title: &str) -> Result<ChartSpec> {
    means.require_columns(&[label, value])?;
    let kept = EXCLUDED_SPECIES
        .iter()
        .fold(lit(true), |acc, excluded| acc.and(col(label).neq(lit(*excluded))));
    let slices = means.filter(kept)?;

    let labels: Vec<String> = slices
        .text_values(label)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    let mut plot = Plot::new();
    plot.add_trace(
        Pie::new(slices.float_values(value)?)
            .labels(labels)
            .text_position(Position::Inside)
            .text_info(PIE_TEXT_INFO),
    );
    plot.set_layout(titled_layout(title));
    Ok(ChartSpec::new(ChartKind::Pie, title, plot))
}

/// Two donuts side by side, one per configured species, each with its
/// species name in the hole. The legend is hidden.
pub fn donut_chart(by_province_and_species: &Table, config: &DonutChartConfig) -> Result<ChartSpec> {
    let species = [config.first.as_str(), config.second.as_str()];
    let centers = [config.first_x, config.second_x];

    let mut plot = Plot::new();
    let mut annotations = Vec::with_capacity(species.len());
    for ((name, x), [left, right]) in species.into_iter().zip(centers).zip(DONUT_DOMAINS) {
        let provinces = species_by_province(by_province_and_species, name)?;
        let labels: Vec<String> = provinces
            .text_values(PROVINCE)?
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        plot.add_trace(
            Pie::new(provinces.float_values(VOLUME)?)
                .labels(labels)
                .name(name)
                .hole(DONUT_HOLE)
                .domain(Domain::new().x(&[left, right]).y(&[0.0, 1.0]))
                .text_position(Position::Inside)
                .text_info(PIE_TEXT_INFO),
        );
        annotations.push(
            Annotation::new()
                .text(name)
                .x(x)
                .y(0.5)
                .font(Font::new().size(config.font_size as usize))
                .show_arrow(false),
        );
    }

    let title = format!("Daerah Produsen {} dan {}", config.first, config.second);
    plot.set_layout(
        titled_layout(&title)
            .annotations(annotations)
            .show_legend(false),
    );
    Ok(ChartSpec::new(ChartKind::Donut, title, plot))
}

/// Slope and intercept of the least-squares line through `points`.
/// None when fewer than two distinct x values are present.
pub fn ols_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let count = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / count;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in points {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Scatter of `y` against `x` with the least-squares trend line over the
/// plotted range. Rows missing either value are not plotted. With no
/// complete row the chart keeps an empty marker trace and no trend line.
pub fn scatter_with_trend(
    table: &Table,
    x: &str,
    y: &str,
    title: &str,
    x_title: &str,
    y_title: &str,
) -> Result<ChartSpec> {
    let points: Vec<(f64, f64)> = table
        .float_values(x)?
        .into_iter()
        .zip(table.float_values(y)?)
        .filter_map(|(px, py)| Some((px?, py?)))
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(
            points.iter().map(|(px, _)| *px).collect::<Vec<f64>>(),
            points.iter().map(|(_, py)| *py).collect::<Vec<f64>>(),
        )
        .mode(Mode::Markers),
    );

    if points.is_empty() {
        tracing::warn!("No rows with both '{}' and '{}' for '{}'", x, y, title);
    } else {
        match ols_fit(&points) {
            Some((slope, intercept)) => {
                let low = points.iter().map(|(px, _)| *px).fold(f64::INFINITY, f64::min);
                let high = points.iter().map(|(px, _)| *px).fold(f64::NEG_INFINITY, f64::max);
                plot.add_trace(
                    Scatter::new(vec![low, high], vec![slope * low + intercept, slope * high + intercept])
                        .mode(Mode::Lines)
                        .name(TREND_NAME),
                );
            }
            None => {
                tracing::warn!(
                    "Not enough distinct points for a trend line on '{}' ({} points)",
                    title,
                    points.len()
                );
            }
        }
    }

    plot.set_layout(axes_layout(title, x_title, y_title));
    Ok(ChartSpec::new(ChartKind::Scatter, title, plot))
}
