// Application layer - Loading, aggregation, charts and layout
pub mod aggregator;
pub mod chart_builder;
pub mod dashboard_service;
pub mod data_loader;
pub mod layout_assembler;
pub mod workbook_source;

#[cfg(test)]
pub(crate) mod test_support;
