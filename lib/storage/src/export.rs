//! Report export: a JSON document for machines and a text layout for people.
//!
//! Both renderings are built in memory, staged as temporary files in the
//! output directory and only then renamed into place. If the second rename
//! fails the first report is removed again, so a failed run never leaves one
//! report without the other.

use anyhow::{Context, Result};
use seqclust_core::ClusterReport;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const JSON_REPORT_NAME: &str = "clusters.json";
pub const TEXT_REPORT_NAME: &str = "clusters.txt";

/// Render reports as a JSON array indented with four spaces
pub fn render_json(reports: &[ClusterReport]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    reports.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Render reports in the human readable layout
pub fn render_text(reports: &[ClusterReport]) -> String {
    let mut out = String::new();
    for report in reports {
        // Writing into a String cannot fail
        let _ = writeln!(out, "Cluster {}", report.cluster_id);
        let _ = writeln!(out, "Number of Entries: {}", report.num_entries);
        let _ = writeln!(out, "Average Distance: {:.2}", report.avg_distance);
        out.push_str("Entries:\n");
        for entry in &report.entries {
            let _ = writeln!(
                out,
                "  Sequence ID: {}, Start: {}, Sequence: {}",
                entry.sequence_id(),
                entry.start_position(),
                entry.sequence()
            );
        }
        out.push('\n');
    }
    out
}

/// Locations of the files written by [`ReportWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Writes both report renderings into an output directory
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn paths(&self) -> ReportPaths {
        ReportPaths {
            json: self.output_dir.join(JSON_REPORT_NAME),
            text: self.output_dir.join(TEXT_REPORT_NAME),
        }
    }

    pub fn write(&self, reports: &[ClusterReport]) -> Result<ReportPaths> {
        let json = render_json(reports)?;
        let text = render_text(reports);
        let paths = self.paths();

        let staged_text = self.stage(text.as_bytes())?;
        let staged_json = self.stage(json.as_bytes())?;

        staged_text
            .persist(&paths.text)
            .map_err(|err| err.error)
            .with_context(|| format!("Failed to write {:?}", paths.text))?;
        if let Err(err) = staged_json.persist(&paths.json) {
            let _ = fs::remove_file(&paths.text);
            return Err(err.error).with_context(|| format!("Failed to write {:?}", paths.json));
        }

        info!(
            "Saved {} clusters to {:?} and {:?}",
            reports.len(),
            paths.text,
            paths.json
        );
        Ok(paths)
    }

    /// Write `data` to a temporary file next to the final reports.
    ///
    /// The file is deleted when dropped unless it is persisted.
    fn stage(&self, data: &[u8]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new_in(&self.output_dir)
            .with_context(|| format!("Failed to create temporary file in {:?}", self.output_dir))?;
        file.write_all(data)?;
        file.as_file().sync_all()?;
        Ok(file)
    }
}
