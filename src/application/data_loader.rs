// Data loader - Reads the six source tables from the workbook
use crate::application::workbook_source::WorkbookSource;
use crate::domain::error::{DashboardError, Result};
use crate::domain::table::Table;

pub const CONSUMPTION_SHEET: &str = "AngkaKonsumsiIkan";
pub const SEED_PRODUCTION_SHEET: &str = "JumlahProduksiBenih";
pub const FARMERS_SHEET: &str = "PembudidayaIkan";
pub const PROCESSED_PRODUCTS_SHEET: &str = "ProdukOlahanIkan";
pub const PRODUCTION_SHEET: &str = "ProduksiBudidayaNasional";
pub const TREATMENT_SHEET: &str = "ProduksiPerlakuanIkanNasional";

pub const REQUIRED_SHEETS: [&str; 6] = [
    CONSUMPTION_SHEET,
    SEED_PRODUCTION_SHEET,
    FARMERS_SHEET,
    PROCESSED_PRODUCTS_SHEET,
    PRODUCTION_SHEET,
    TREATMENT_SHEET,
];

#[derive(Debug, Clone)]
pub struct FishTables {
    pub consumption: Table,
    pub seed_production: Table,
    pub farmers: Table,
    pub processed_products: Table,
    pub production: Table,
    pub treatment: Table,
}

/// Load every required sheet. A single missing sheet aborts the load.
pub fn load_tables(source: &mut dyn WorkbookSource) -> Result<FishTables> {
    let available = source.sheet_names();
    if let Some(missing) = REQUIRED_SHEETS
        .iter()
        .find(|sheet| !available.iter().any(|name| name.as_str() == **sheet))
    {
        return Err(DashboardError::MissingSheet(missing.to_string()));
    }

    let mut read = |sheet: &str| -> Result<Table> {
        let table = source.read_sheet(sheet)?;
        tracing::debug!(
            "Loaded sheet {}: {} rows, {} columns",
            sheet,
            table.len(),
            table.columns().len()
        );
        Ok(table)
    };

    Ok(FishTables {
        consumption: read(CONSUMPTION_SHEET)?,
        seed_production: read(SEED_PRODUCTION_SHEET)?,
        farmers: read(FARMERS_SHEET)?,
        processed_products: read(PROCESSED_PRODUCTS_SHEET)?,
        production: read(PRODUCTION_SHEET)?,
        treatment: read(TREATMENT_SHEET)?,
    })
}
