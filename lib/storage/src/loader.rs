// Loader for per-source entry files written by the scanner
use anyhow::{anyhow, Context, Result};
use seqclust_core::{Entry, RawEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Source identifier for an entry file: the file name up to its first dot
pub fn sequence_id_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.split('.').next().map(str::to_string)
}

/// Parse one file's JSON array of `{start_position, sequence}` records.
///
/// `first_index` is the global index of the first record, used in
/// `InvalidEntry` errors.
pub fn parse_entries(sequence_id: &str, json: &str, first_index: usize) -> Result<Vec<Entry>> {
    let records: Vec<RawEntry> = serde_json::from_str(json)?;
    let entries = records
        .into_iter()
        .enumerate()
        .map(|(offset, raw)| raw.into_entry(sequence_id, first_index + offset))
        .collect::<seqclust_core::Result<Vec<Entry>>>()?;
    Ok(entries)
}

/// Load every `*.json` file in `dir`, in file name order.
///
/// Each entry is tagged with the id derived from its file name. Any invalid
/// record aborts the whole load.
pub fn load_entries<P: AsRef<Path>>(dir: P) -> Result<Vec<Entry>> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(".json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    let mut entries = Vec::new();
    for path in &files {
        let sequence_id = sequence_id_from_path(path)
            .ok_or_else(|| anyhow!("Invalid entry file name {:?}", path))?;
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let loaded = parse_entries(&sequence_id, &json, entries.len())
            .with_context(|| format!("Failed to load entries from {:?}", path))?;
        debug!("Loaded {} entries from {:?}", loaded.len(), path);
        entries.extend(loaded);
    }

    info!("Loaded {} entries from {} files", entries.len(), files.len());
    Ok(entries)
}
