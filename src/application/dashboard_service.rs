// Dashboard service - Runs load, aggregation, charting and layout once
use crate::application::aggregator::{
    self, CATEGORY, CONSUMPTION_PARAM, CONSUMPTION_VALUE, COUNT, FARMER_COUNT, PROVINCE, SPECIES,
    VOLUME, YEAR,
};
use crate::application::chart_builder::{
    bar_chart, donut_chart, line_chart, pie_chart, scatter_with_trend, LineChartConfig,
};
use crate::application::data_loader::{load_tables, FishTables};
use crate::application::layout_assembler::{assemble, donut_id, DashboardCharts, DASHBOARD_TITLE};
use crate::application::workbook_source::WorkbookSource;
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::{Dashboard, SummaryCard};
use crate::domain::error::Result;
use crate::infrastructure::config::ChartsConfig;

#[derive(Clone)]
pub struct DashboardService {
    charts_config: ChartsConfig,
}

impl DashboardService {
    pub fn new(charts_config: ChartsConfig) -> Self {
        Self { charts_config }
    }

    /// Build the whole dashboard from a workbook. Any missing sheet, column
    /// or species aborts the build.
    pub fn build(&self, source: &mut dyn WorkbookSource) -> Result<Dashboard> {
        let tables = load_tables(source)?;
        tracing::info!(
            "Loaded workbook: {} production rows, {} farmer rows",
            tables.production.len(),
            tables.farmers.len()
        );

        let (cards, charts) = self.build_widgets(&tables)?;
        let root = assemble(cards, charts);
        tracing::info!("Built {} charts", root.charts().len());

        Ok(Dashboard::new(DASHBOARD_TITLE.to_string(), root))
    }

    fn build_widgets(&self, tables: &FishTables) -> Result<(Vec<SummaryCard>, DashboardCharts)> {
        let config = &self.charts_config;

        let by_year_and_category = aggregator::mean_by_year_and_category(&tables.production)?;
        let farmers_by_year = aggregator::mean_by_year(&tables.farmers)?;
        let farmers_by_province = aggregator::mean_by_province(&tables.farmers)?;
        let by_species = aggregator::mean_by_species(&tables.production)?;
        let by_province_and_species = aggregator::mean_by_province_and_species(&tables.production)?;

        let cards = vec![
            SummaryCard::new(
                "Rata-Rata Produksi Komoditas Tahun (2002-2012)",
                aggregator::mean_of_means(&by_year_and_category, Some(CATEGORY), VOLUME)?,
            ),
            SummaryCard::new(
                "Rata-Rata Pembudidaya Komoditas Tahun (2002-2012)",
                aggregator::mean_of_means(&farmers_by_year, None, COUNT)?,
            ),
        ];

        let trend = aggregator::production_trend(&by_year_and_category, &config.trend_categories)?;
        let production_trend = line_chart(
            &trend,
            &LineChartConfig {
                title: "Rata-Rata Produksi Komoditas per Tahun",
                x: YEAR,
                y: VOLUME,
                color: Some(CATEGORY),
                x_title: "Tahun",
                y_title: "Jumlah",
            },
        )?;

        let consumption = aggregator::consumption_series(&tables.consumption)?;
        let consumption_trend = line_chart(
            &consumption,
            &LineChartConfig {
                title: "Penyediaan Ikan dan Konsumsi Ikan per Kapita",
                x: YEAR,
                y: CONSUMPTION_VALUE,
                color: Some(CONSUMPTION_PARAM),
                x_title: "Tahun",
                y_title: "Kg/kapita",
            },
        )?;

        let farmers_chart = bar_chart(
            &farmers_by_province,
            PROVINCE,
            COUNT,
            "Rata-rata Pembudidaya Ikan per Provinsi (2002 - 2012)",
            " ",
            " ",
        )?;

        let species_share = pie_chart(&by_species, SPECIES, VOLUME, "Persentase Komoditas")?;

        let joined = aggregator::join_farmers_to_production(&tables.farmers, &tables.production)?;
        let subset = aggregator::farmer_volume_subset(
            &joined,
            config.scatter_year,
            &config.scatter_species,
        )?;
        tracing::debug!(
            "Scatter subset for {} / {}: {} rows",
            config.scatter_year,
            config.scatter_species,
            subset.len()
        );
        let farmers_vs_volume = scatter_with_trend(
            &subset,
            FARMER_COUNT,
            VOLUME,
            "Hubungan Jumlah Pembudidaya dengan Volume Produksi",
            "Jumlah Pembudidaya ",
            " Volume Produksi",
        )?;

        let donuts = config
            .donuts
            .iter()
            .map(|donut| -> Result<(String, ChartSpec)> {
                let chart = donut_chart(&by_province_and_species, donut)?;
                Ok((donut_id(&donut.first, &donut.second), chart))
            })
            .collect::<Result<Vec<_>>>()?;

        let charts = DashboardCharts {
            production_trend,
            consumption_trend,
            farmers_by_province: farmers_chart,
            species_share,
            farmers_vs_volume,
            donuts,
        };

        Ok((cards, charts))
    }
}
