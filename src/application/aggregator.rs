// Aggregator - Summary tables derived from the raw sheets
use crate::domain::error::{DashboardError, Result};
use crate::domain::table::Table;
use polars::prelude::*;

pub const PROVINCE: &str = "NamaProvinsi";
pub const SPECIES: &str = "NamaIkan";
pub const CATEGORY: &str = "Budidaya";
pub const YEAR: &str = "Tahun";
pub const VOLUME: &str = "Volume";
pub const COUNT: &str = "Jumlah";
pub const FARMER_COUNT: &str = "JumlahPembudidaya";
pub const CONSUMPTION_PARAM: &str = "ParamKonsumsiIkan";
pub const CONSUMPTION_VALUE: &str = "Nilai";

/// Species rows that are not commodities of their own: the national aggregate
/// and seaweed. Spelled exactly as in the workbook, where seaweed is
/// "rumput laut"; there is no English "seaweed" label to match.
pub const EXCLUDED_SPECIES: [&str; 2] = ["total", "rumput laut"];

/// Consumption parameters plotted against each other.
pub const CONSUMPTION_PARAMS: [&str; 2] = [
    "Penyediaan ikan untuk konsumsi per kapita",
    "Konsumsi ikan per kapita",
];

const JOIN_KEYS: [&str; 2] = [PROVINCE, YEAR];

/// Columns the join brings in twice or that only carry foreign keys.
const JOIN_DROPPED_COLUMNS: [&str; 4] = ["ID_y", "ProvinsiID_y", "Budidaya_y", "Budidaya_x"];

const ROW_ORDER: &str = "__row_order";

/// Mean of `value` for every distinct combination of `keys`, one row per
/// combination, keys ascending. Rows with an empty key or value are left out.
fn grouped_mean(table: &Table, keys: &[&str], value: &str) -> Result<Table> {
    let mut used = keys.to_vec();
    used.push(value);
    table.require_columns(&used)?;

    let complete = used
        .iter()
        .fold(lit(true), |acc, column| acc.and(col(*column).is_not_null()));
    let by: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();

    let frame = table
        .lazy()
        .filter(complete)
        .group_by(by.clone())
        .agg([col(value).cast(DataType::Float64).mean()])
        .sort_by_exprs(by, SortMultipleOptions::default())
        .collect()?;
    Ok(table.with_frame(frame))
}

/// Rows whose `column` equals `label`. A label with no row is reported as a
/// missing column, since it names a column of the wide pivot.
fn rows_labelled(table: &Table, column: &str, label: &str) -> Result<Table> {
    table.require_columns(&[column])?;
    let rows = table.filter(col(column).eq(lit(label)))?;
    if rows.is_empty() {
        return Err(DashboardError::missing_column(table.name(), label));
    }
    Ok(rows)
}

/// Mean production volume per (province, species), long form:
/// `NamaProvinsi`, `NamaIkan`, `Volume`.
pub fn mean_by_province_and_species(production: &Table) -> Result<Table> {
    grouped_mean(production, &[PROVINCE, SPECIES], VOLUME)
}

/// One species' provinces, largest mean volume first, ties in province order.
pub fn rank_provinces_by_species(by_province_and_species: &Table, species: &str) -> Result<Table> {
    species_by_province(by_province_and_species, species)?.sorted_descending_by(VOLUME)
}

/// One species' mean volume per province, provinces ascending.
pub fn species_by_province(by_province_and_species: &Table, species: &str) -> Result<Table> {
    rows_labelled(by_province_and_species, SPECIES, species)
}

/// Mean farmer count per year.
pub fn mean_by_year(farmers: &Table) -> Result<Table> {
    grouped_mean(farmers, &[YEAR], COUNT)
}

/// Mean farmer count per province, largest first.
pub fn mean_by_province(farmers: &Table) -> Result<Table> {
    grouped_mean(farmers, &[PROVINCE], COUNT)?.sorted_descending_by(COUNT)
}

/// Mean production volume per (year, aquaculture category).
pub fn mean_by_year_and_category(production: &Table) -> Result<Table> {
    grouped_mean(production, &[YEAR, CATEGORY], VOLUME)
}

/// Mean production volume per species, aggregate and seaweed rows removed.
pub fn mean_by_species(production: &Table) -> Result<Table> {
    let means = grouped_mean(production, &[SPECIES], VOLUME)?;
    let kept = EXCLUDED_SPECIES
        .iter()
        .fold(lit(true), |acc, label| acc.and(col(SPECIES).neq(lit(*label))));
    means.filter(kept)
}

/// Mean over the columns of a pivot: the mean of `value` per `column_key`
/// label, then the mean of those. Without a column key the pivot has a single
/// column and this is the plain mean of its rows.
pub fn mean_of_means(means: &Table, column_key: Option<&str>, value: &str) -> Result<Option<f64>> {
    let column_means = match column_key {
        Some(key) => grouped_mean(means, &[key], value)?,
        None => means.clone(),
    };
    column_means.require_columns(&[value])?;

    let overall = column_means
        .lazy()
        .select([col(value).cast(DataType::Float64).mean()])
        .collect()?;
    Ok(column_means
        .with_frame(overall)
        .float_values(value)?
        .first()
        .copied()
        .flatten())
}

/// Year rows of the selected categories, grouped by category in the order given.
pub fn production_trend(by_year_and_category: &Table, categories: &[String]) -> Result<Table> {
    let mut frame = by_year_and_category.frame().clear();
    for category in categories {
        let rows = rows_labelled(by_year_and_category, CATEGORY, category)?;
        frame.vstack_mut(rows.frame())?;
    }
    Ok(by_year_and_category.with_frame(frame))
}

/// Supply and intake per capita rows of the consumption sheet.
pub fn consumption_series(consumption: &Table) -> Result<Table> {
    consumption.require_columns(&[CONSUMPTION_PARAM, YEAR, CONSUMPTION_VALUE])?;
    let wanted = CONSUMPTION_PARAMS
        .iter()
        .fold(lit(false), |acc, param| acc.or(col(CONSUMPTION_PARAM).eq(lit(*param))));
    consumption.filter(wanted)
}

/// Farmer counts joined onto production by province and year.
///
/// Every production row appears exactly once and in sheet order. Farmer rows
/// are first reduced to one per (province, year): the count is averaged over
/// the aquaculture categories, other fields come from the first row. Farmer
/// columns lead with an `_x` suffix where production has the same name,
/// production columns follow with `_y`. Duplicate and foreign-key columns are
/// dropped and the farmer count becomes `JumlahPembudidaya`.
pub fn join_farmers_to_production(farmers: &Table, production: &Table) -> Result<Table> {
    farmers.require_columns(&[PROVINCE, YEAR, COUNT])?;
    production.require_columns(&JOIN_KEYS)?;

    let farmer_columns = farmers.columns();
    let production_columns = production.columns();
    let is_key = |name: &str| JOIN_KEYS.contains(&name);
    let suffixed = |name: &str, other: &[String], suffix: &str| {
        if !is_key(name) && other.iter().any(|o| o == name) {
            format!("{}{}", name, suffix)
        } else {
            name.to_string()
        }
    };

    let farmer_fields: Vec<Expr> = farmer_columns
        .iter()
        .filter(|name| !is_key(name.as_str()))
        .map(|name| {
            let field = if name.as_str() == COUNT {
                col(name.as_str()).cast(DataType::Float64).mean()
            } else {
                col(name.as_str()).first()
            };
            field.alias(suffixed(name.as_str(), &production_columns, "_x"))
        })
        .collect();
    let farmers_by_key = farmers
        .lazy()
        .filter(col(PROVINCE).is_not_null().and(col(YEAR).is_not_null()))
        .with_columns([col(YEAR).cast(DataType::Float64)])
        .group_by_stable([col(PROVINCE), col(YEAR)])
        .agg(farmer_fields);

    let mut production_fields: Vec<Expr> = production_columns
        .iter()
        .map(|name| match name.as_str() {
            YEAR => col(YEAR).cast(DataType::Float64),
            _ => col(name.as_str()).alias(suffixed(name.as_str(), &farmer_columns, "_y")),
        })
        .collect();
    production_fields.push(col(ROW_ORDER));
    let numbered = production
        .frame()
        .with_row_index(ROW_ORDER.into(), None)?
        .lazy()
        .select(production_fields);

    let mut output: Vec<Expr> = farmer_columns
        .iter()
        .map(|name| col(suffixed(name.as_str(), &production_columns, "_x")))
        .collect();
    output.extend(
        production_columns
            .iter()
            .filter(|name| !is_key(name.as_str()))
            .map(|name| col(suffixed(name.as_str(), &farmer_columns, "_y"))),
    );

    let keys = [col(PROVINCE), col(YEAR)];
    let joined = numbered
        .join(farmers_by_key, keys.clone(), keys, JoinArgs::new(JoinType::Left))
        .sort_by_exprs([col(ROW_ORDER)], SortMultipleOptions::default())
        .select(output)
        .collect()?;

    production
        .with_frame(joined)
        .drop_columns(&JOIN_DROPPED_COLUMNS)?
        .rename_column(COUNT, FARMER_COUNT)
}

/// Joined rows of one year and one species label.
pub fn farmer_volume_subset(joined: &Table, year: i32, species: &str) -> Result<Table> {
    joined.require_columns(&[YEAR, SPECIES])?;
    joined.filter(
        col(YEAR)
            .eq(lit(f64::from(year)))
            .and(col(SPECIES).eq(lit(species))),
    )
}
