// In-memory workbook and the small fixture shared by the pipeline tests
use crate::application::data_loader::{
    CONSUMPTION_SHEET, FARMERS_SHEET, PROCESSED_PRODUCTS_SHEET, PRODUCTION_SHEET,
    SEED_PRODUCTION_SHEET, TREATMENT_SHEET,
};
use crate::application::workbook_source::WorkbookSource;
use crate::domain::chart::ChartSpec;
use crate::domain::error::{DashboardError, Result};
use crate::domain::table::{Cell, Table};

#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<Table>,
}

impl MemoryWorkbook {
    pub fn insert(&mut self, table: Table) {
        self.remove(table.name());
        self.sheets.push(table);
    }

    pub fn remove(&mut self, name: &str) {
        self.sheets.retain(|t| t.name() != name);
    }
}

impl WorkbookSource for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|t| t.name().to_string()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Table> {
        self.sheets
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .ok_or_else(|| DashboardError::MissingSheet(name.to_string()))
    }
}

pub fn n(value: f64) -> Cell {
    Cell::Number(value)
}

pub fn t(value: &str) -> Cell {
    Cell::text(value)
}

pub fn table(name: &str, columns: &[&str], rows: Vec<Vec<Cell>>) -> Table {
    Table::from_rows(name, columns.iter().map(|c| c.to_string()).collect(), rows).unwrap()
}

/// The chart as plotly.js receives it.
pub fn figure(chart: &ChartSpec) -> serde_json::Value {
    serde_json::from_str(&chart.to_json()).unwrap()
}

pub fn production_table() -> Table {
    table(
        PRODUCTION_SHEET,
        &["ID", "ProvinsiID", "NamaProvinsi", "Tahun", "Budidaya", "NamaIkan", "Volume"],
        vec![
            vec![n(1.0), n(11.0), t("A"), n(2003.0), t("semua budidaya"), t("x"), n(10.0)],
            vec![n(2.0), n(12.0), t("B"), n(2003.0), t("semua budidaya"), t("x"), n(20.0)],
            vec![n(3.0), n(11.0), t("A"), n(2003.0), t("semua budidaya"), t("total"), n(100.0)],
            vec![n(4.0), n(12.0), t("B"), n(2003.0), t("semua budidaya"), t("total"), n(50.0)],
        ],
    )
}

pub fn farmers_table() -> Table {
    table(
        FARMERS_SHEET,
        &["ID", "ProvinsiID", "NamaProvinsi", "Tahun", "Budidaya", "Jumlah"],
        vec![
            vec![n(1.0), n(11.0), t("A"), n(2003.0), t("semua budidaya"), n(5.0)],
            vec![n(2.0), n(12.0), t("B"), n(2003.0), t("semua budidaya"), n(7.0)],
        ],
    )
}

pub fn consumption_table() -> Table {
    let supply = "Penyediaan ikan untuk konsumsi per kapita";
    let intake = "Konsumsi ikan per kapita";
    table(
        CONSUMPTION_SHEET,
        &["ID", "ParamKonsumsiIkan", "Tahun", "Nilai"],
        vec![
            vec![n(1.0), t(supply), n(2003.0), n(30.0)],
            vec![n(2.0), t(intake), n(2003.0), n(25.0)],
            vec![n(3.0), t("Konsumsi ikan segar"), n(2003.0), n(10.0)],
            vec![n(4.0), t(supply), n(2004.0), n(32.0)],
            vec![n(5.0), t(intake), n(2004.0), n(26.5)],
            vec![n(6.0), t("Konsumsi ikan segar"), n(2004.0), n(11.0)],
        ],
    )
}

/// Provinces {A, B}, species {"total", "x"}, year 2003:
/// A/x=10, B/x=20, A/total=100, B/total=50; A has 5 farmers, B has 7.
pub fn fixture_workbook() -> MemoryWorkbook {
    let mut workbook = MemoryWorkbook::default();
    workbook.insert(consumption_table());
    workbook.insert(table(
        SEED_PRODUCTION_SHEET,
        &["ID", "NamaProvinsi", "Tahun", "JenisBenih", "Jumlah"],
        vec![
            vec![n(1.0), t("A"), n(2003.0), t("nila"), n(1200.0)],
            vec![n(2.0), t("B"), n(2003.0), t("mas"), n(800.0)],
            vec![n(3.0), t("B"), n(2004.0), t("nila"), n(950.0)],
        ],
    ));
    workbook.insert(farmers_table());
    workbook.insert(table(
        PROCESSED_PRODUCTS_SHEET,
        &["ID", "Produk", "Tahun", "Volume", "Satuan"],
        vec![vec![n(1.0), t("ikan asin"), n(2003.0), n(80.0), t("ton")]],
    ));
    workbook.insert(production_table());
    workbook.insert(table(
        TREATMENT_SHEET,
        &["ID", "Perlakuan", "Tahun", "Volume"],
        vec![
            vec![n(1.0), t("dibekukan"), n(2003.0), n(40.0)],
            vec![n(2.0), t("diasinkan"), n(2003.0), n(25.0)],
        ],
    ));
    workbook
}
