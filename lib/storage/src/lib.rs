//! Loading scanner output and writing cluster reports.

pub mod export;
pub mod loader;

pub use export::{render_json, render_text, ReportPaths, ReportWriter, JSON_REPORT_NAME, TEXT_REPORT_NAME};
pub use loader::{load_entries, parse_entries, sequence_id_from_path};
