// Domain layer - Tables, charts and the page layout
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod table;
