use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub workbook: WorkbookSettings,
    #[serde(default)]
    pub charts: ChartsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkbookSettings {
    #[serde(default = "default_workbook_path")]
    pub path: PathBuf,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            path: default_workbook_path(),
        }
    }
}

/// Literal parameters of the chart invocations.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ChartsConfig {
    /// Year plotted by the farmers-vs-volume scatter.
    #[serde(default = "default_scatter_year")]
    pub scatter_year: i32,
    /// Species row plotted by the farmers-vs-volume scatter.
    #[serde(default = "default_scatter_species")]
    pub scatter_species: String,
    /// Aquaculture categories drawn on the production trend.
    #[serde(default = "default_trend_categories")]
    pub trend_categories: Vec<String>,
    #[serde(default = "default_donuts")]
    pub donuts: Vec<DonutChartConfig>,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            scatter_year: default_scatter_year(),
            scatter_species: default_scatter_species(),
            trend_categories: default_trend_categories(),
            donuts: default_donuts(),
        }
    }
}

/// One dual-donut chart: the two species columns, where their center labels
/// sit on the x axis (paper coordinates) and the label font size.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DonutChartConfig {
    pub first: String,
    pub second: String,
    pub first_x: f64,
    pub second_x: f64,
    pub font_size: u32,
}

impl DonutChartConfig {
    pub fn new(first: &str, second: &str, first_x: f64, second_x: f64, font_size: u32) -> Self {
        Self {
            first: first.to_string(),
            second: second.to_string(),
            first_x,
            second_x,
            font_size,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_workbook_path() -> PathBuf {
    PathBuf::from("ikan.xlsx")
}

fn default_scatter_year() -> i32 {
    2003
}

fn default_scatter_species() -> String {
    "total".to_string()
}

fn default_trend_categories() -> Vec<String> {
    vec!["semua budidaya".to_string()]
}

fn default_donuts() -> Vec<DonutChartConfig> {
    vec![
        DonutChartConfig::new("bandeng", "udang total", 0.16, 0.85, 12),
        DonutChartConfig::new("nila", "mas", 0.18, 0.82, 22),
    ]
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from("config/dashboard")
}

pub fn load_dashboard_config_from(name: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    Ok(settings.try_deserialize()?)
}
