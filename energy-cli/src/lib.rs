pub mod app;
pub mod config;
pub mod document;
pub mod form;
pub mod logging;
pub mod profile_csv;
pub mod report_view;
pub mod utils;
