// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod excel_workbook;
pub mod html_renderer;
