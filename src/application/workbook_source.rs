// Workbook trait for sheet access
use crate::domain::error::Result;
use crate::domain::table::Table;

pub trait WorkbookSource {
    /// Names of the sheets the workbook contains, in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Read one sheet as a table, header row first.
    /// Fails with `MissingSheet` when the workbook has no sheet of that name.
    fn read_sheet(&mut self, name: &str) -> Result<Table>;
}
