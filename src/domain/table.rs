// Sheet tables: workbook cells loaded into named polars data frames
use super::error::{DashboardError, Result};
use polars::prelude::*;
use std::fmt;

/// A single spreadsheet cell, before it lands in a typed column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(_) => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            // Whole numbers (years, ids) print without a fraction
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// A named table. Raw sheets and every table derived from them keep the
/// sheet name so errors can say where a column was expected.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    frame: DataFrame,
}

impl Table {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }

    /// Build a table from a header row and cell rows.
    ///
    /// Each column gets one type: `Int64` when every cell is a whole number,
    /// `Float64` when every non-empty cell is a number, `String` otherwise.
    /// Empty cells become nulls and short rows are padded with them.
    /// Repeated header names get a `.1`, `.2`, ... suffix.
    pub fn from_rows(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut frame_columns = Vec::with_capacity(columns.len());
        for (idx, column_name) in unique_names(columns).into_iter().enumerate() {
            let cells: Vec<Option<&Cell>> = rows.iter().map(|row| row.get(idx)).collect();
            frame_columns.push(typed_column(column_name, &cells));
        }
        Ok(Self::new(name, DataFrame::new(frame_columns)?))
    }

    /// Same name, new contents.
    pub fn with_frame(&self, frame: DataFrame) -> Self {
        Self::new(self.name.clone(), frame)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        let present = self.frame.get_column_names();
        match columns
            .iter()
            .find(|column| !present.iter().any(|name| name.as_str() == **column))
        {
            Some(missing) => Err(DashboardError::missing_column(&self.name, missing)),
            None => Ok(()),
        }
    }

    fn column(&self, column: &str) -> Result<&Column> {
        self.require_columns(&[column])?;
        Ok(self.frame.column(column)?)
    }

    /// Rows matching `predicate`, in their current order.
    pub fn filter(&self, predicate: Expr) -> Result<Table> {
        Ok(self.with_frame(self.lazy().filter(predicate).collect()?))
    }

    /// Rows reordered by `column`, largest first. Ties keep their current
    /// relative order and nulls go last.
    pub fn sorted_descending_by(&self, column: &str) -> Result<Table> {
        self.require_columns(&[column])?;
        let options = SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true);
        Ok(self.with_frame(self.lazy().sort_by_exprs([col(column)], options).collect()?))
    }

    pub fn drop_columns(&self, columns: &[&str]) -> Result<Table> {
        self.require_columns(columns)?;
        let mut frame = self.frame.clone();
        for column in columns {
            frame = frame.drop(column)?;
        }
        Ok(self.with_frame(frame))
    }

    pub fn rename_column(&self, from: &str, to: &str) -> Result<Table> {
        self.require_columns(&[from])?;
        let mut frame = self.frame.clone();
        frame.rename(from, to.into())?;
        Ok(self.with_frame(frame))
    }

    /// Numeric view of a column. Nulls and cells that are not numbers are None.
    pub fn float_values(&self, column: &str) -> Result<Vec<Option<f64>>> {
        let floats = self.column(column)?.cast(&DataType::Float64)?;
        Ok(floats
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect())
    }

    pub fn text_values(&self, column: &str) -> Result<Vec<Option<String>>> {
        let text = self.column(column)?.cast(&DataType::String)?;
        Ok(text
            .str()?
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect())
    }

    /// Column values as chart coordinates: integers stay integers, text stays
    /// text, nulls become JSON nulls.
    pub fn plot_values(&self, column: &str) -> Result<Vec<serde_json::Value>> {
        let dtype = self.column(column)?.dtype().clone();
        if dtype == DataType::String {
            return Ok(self
                .text_values(column)?
                .into_iter()
                .map(serde_json::Value::from)
                .collect());
        }
        if dtype.is_integer() {
            let ints = self.column(column)?.cast(&DataType::Int64)?;
            return Ok(ints.i64()?.into_iter().map(serde_json::Value::from).collect());
        }
        Ok(self
            .float_values(column)?
            .into_iter()
            .map(serde_json::Value::from)
            .collect())
    }
}

fn unique_names(columns: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(columns.len());
    for column in columns {
        let mut name = column.clone();
        let mut copy = 0;
        while names.contains(&name) {
            copy += 1;
            name = format!("{}.{}", column, copy);
        }
        names.push(name);
    }
    names
}

fn present(cell: Option<&Cell>) -> Option<&Cell> {
    cell.filter(|c| !c.is_empty())
}

fn typed_column(name: String, cells: &[Option<&Cell>]) -> Column {
    let numeric = cells
        .iter()
        .filter_map(|cell| present(*cell))
        .all(|cell| cell.as_f64().is_some());

    if !numeric {
        let text: Vec<Option<String>> = cells
            .iter()
            .map(|cell| present(*cell).map(Cell::to_string))
            .collect();
        return Column::new(name.into(), text);
    }

    let floats: Vec<Option<f64>> = cells
        .iter()
        .map(|cell| present(*cell).and_then(Cell::as_f64))
        .collect();
    let whole = !floats.is_empty()
        && floats
            .iter()
            .all(|v| v.is_some_and(|n| n.fract() == 0.0 && n.abs() < 1e15));
    if whole {
        let ints: Vec<i64> = floats.iter().flatten().map(|n| *n as i64).collect();
        Column::new(name.into(), ints)
    } else {
        Column::new(name.into(), floats)
    }
}
