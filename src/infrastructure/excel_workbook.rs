// Excel workbook adapter backed by calamine
use crate::application::workbook_source::WorkbookSource;
use crate::domain::error::{DashboardError, Result};
use crate::domain::table::{Cell, Table};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct ExcelWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(DashboardError::WorkbookNotFound(path));
        }

        let sheets = open_workbook_auto(&path).map_err(|e| DashboardError::Workbook {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!("Opened workbook {}", path.display());

        Ok(Self { path, sheets })
    }
}

impl WorkbookSource for ExcelWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Table> {
        if !self.sheet_names().iter().any(|sheet| sheet == name) {
            return Err(DashboardError::MissingSheet(name.to_string()));
        }

        let range = self
            .sheets
            .worksheet_range(name)
            .map_err(|e| DashboardError::Workbook {
                path: self.path.clone(),
                message: format!("sheet '{}': {}", name, e),
            })?;

        let mut rows = range.rows();
        let columns = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(idx, cell)| header_name(idx, cell))
                .collect(),
            None => Vec::new(),
        };

        Table::from_rows(name, columns, body_rows(rows))
    }
}

/// Data rows of a sheet. Blank rows inside the data stay as rows of nulls;
/// only the blank rows at the end of the used range are dropped.
fn body_rows<'a>(rows: impl Iterator<Item = &'a [Data]>) -> Vec<Vec<Cell>> {
    let mut body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    while body.last().is_some_and(|row| row.iter().all(Cell::is_empty)) {
        body.pop();
    }
    body
}

fn header_name(idx: usize, cell: &Data) -> String {
    match cell_value(cell) {
        Cell::Empty => format!("Unnamed: {}", idx),
        Cell::Text(s) => s,
        number => number.to_string(),
    }
}

fn cell_value(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::Error(_) => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::data_loader::{
        load_tables, CONSUMPTION_SHEET, FARMERS_SHEET, PROCESSED_PRODUCTS_SHEET, PRODUCTION_SHEET,
        SEED_PRODUCTION_SHEET, TREATMENT_SHEET,
    };
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    const SHEET_COLUMNS: [(&str, &[&str]); 6] = [
        (CONSUMPTION_SHEET, &["ID", "ParamKonsumsiIkan", "Tahun", "Nilai"]),
        (SEED_PRODUCTION_SHEET, &["ID", "NamaProvinsi", "Tahun", "JenisBenih", "Jumlah"]),
        (FARMERS_SHEET, &["ID", "NamaProvinsi", "Tahun", "Budidaya", "Jumlah"]),
        (PROCESSED_PRODUCTS_SHEET, &["Produk", "Tahun", "Volume"]),
        (PRODUCTION_SHEET, &["NamaProvinsi", "Tahun", "NamaIkan", "Volume"]),
        (TREATMENT_SHEET, &["Perlakuan", "Volume"]),
    ];

    /// Writes every required sheet with its own header and two data rows.
    /// On the production sheet the second data row sits below a blank row
    /// and one province cell is whitespace only.
    fn write_fixture(dir: &TempDir, skip: Option<&str>) -> PathBuf {
        let path = dir.path().join("ikan.xlsx");
        let mut workbook = Workbook::new();

        for (sheet, columns) in SHEET_COLUMNS.iter().filter(|(s, _)| Some(*s) != skip) {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*sheet).unwrap();
            for (col, header) in columns.iter().enumerate() {
                worksheet.write_string(0, col as u16, *header).unwrap();
            }

            let second_row = if *sheet == PRODUCTION_SHEET { 3 } else { 2 };
            for (col, _) in columns.iter().enumerate() {
                worksheet.write_number(1, col as u16, 10 + col as u32).unwrap();
                worksheet.write_number(second_row, col as u16, 20 + col as u32).unwrap();
            }
            if *sheet == PRODUCTION_SHEET {
                worksheet.write_string(1, 0, "ACEH").unwrap();
                worksheet.write_string(second_row, 0, "  ").unwrap();
            }
        }

        workbook.save(&path).unwrap();
        path
    }

    #[test]
    fn test_reads_every_sheet_with_its_own_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, None);

        let mut workbook = ExcelWorkbook::open(&path).unwrap();
        let tables = load_tables(&mut workbook).unwrap();

        let loaded = [
            &tables.consumption,
            &tables.seed_production,
            &tables.farmers,
            &tables.processed_products,
            &tables.production,
            &tables.treatment,
        ];
        for (table, (sheet, columns)) in loaded.into_iter().zip(SHEET_COLUMNS) {
            let expected_rows = if sheet == PRODUCTION_SHEET { 3 } else { 2 };
            assert_eq!(table.name(), sheet);
            assert_eq!(table.columns(), columns, "columns of {}", sheet);
            assert_eq!(table.len(), expected_rows, "row count of {}", sheet);
        }
    }

    #[test]
    fn test_keeps_blank_rows_and_whitespace_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, None);

        let mut workbook = ExcelWorkbook::open(&path).unwrap();
        let production = workbook.read_sheet(PRODUCTION_SHEET).unwrap();

        assert_eq!(
            production.text_values("NamaProvinsi").unwrap(),
            vec![Some("ACEH".to_string()), None, Some("  ".to_string())]
        );
        assert_eq!(
            production.float_values("Volume").unwrap(),
            vec![Some(13.0), None, Some(23.0)]
        );
    }

    #[test]
    fn test_only_trailing_blank_rows_are_dropped() {
        let rows: Vec<Vec<Data>> = vec![
            vec![Data::String("ACEH".into()), Data::Float(1.0)],
            vec![Data::Empty, Data::String(String::new())],
            vec![Data::String(" ".into()), Data::Empty],
            vec![Data::Empty, Data::Empty],
            vec![Data::Error(calamine::CellErrorType::NA), Data::Empty],
        ];
        let body = body_rows(rows.iter().map(Vec::as_slice));

        assert_eq!(body.len(), 3);
        assert!(body[1].iter().all(Cell::is_empty));
        assert_eq!(body[2][0], Cell::text(" "));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExcelWorkbook::open(dir.path().join("nope.xlsx")).err().unwrap();
        assert!(matches!(err, DashboardError::WorkbookNotFound(_)));
    }

    #[test]
    fn test_missing_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, Some(PROCESSED_PRODUCTS_SHEET));

        let mut workbook = ExcelWorkbook::open(&path).unwrap();
        assert!(matches!(
            workbook.read_sheet(PROCESSED_PRODUCTS_SHEET),
            Err(DashboardError::MissingSheet(_))
        ));
        assert!(matches!(
            load_tables(&mut workbook),
            Err(DashboardError::MissingSheet(ref sheet)) if sheet == PROCESSED_PRODUCTS_SHEET
        ));
    }

    #[test]
    fn test_not_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ikan.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let err = ExcelWorkbook::open(&path).err().unwrap();
        assert!(matches!(err, DashboardError::Workbook { .. }));
    }

    #[test]
    fn test_header_names() {
        assert_eq!(header_name(3, &Data::Empty), "Unnamed: 3");
        assert_eq!(header_name(0, &Data::String("Tahun".into())), "Tahun");
        assert_eq!(header_name(0, &Data::Float(2003.0)), "2003");
    }
}
