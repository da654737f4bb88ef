// Fish commodity dashboard: workbook aggregation, charts and a static page server
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
