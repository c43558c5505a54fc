//! Host to available-dates mapping used to populate the selectors.
//!
//! The ingest store keeps one `<host>--<date>.logs.txt` file per upload in
//! the `uploads`, `reports` and `archive` folders. A [`HostMap`] collects the
//! distinct dates per host from those names.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Suffix of ingested log files.
pub const LOG_FILE_SUFFIX: &str = ".logs.txt";

/// Separator between host and date in ingested file names.
pub const NAME_SEPARATOR: &str = "--";

/// Folders of the ingest root that hold log files.
pub const INGEST_FOLDERS: [&str; 3] = ["uploads", "reports", "archive"];

/// Ordered mapping from host name to its available dates.
///
/// Hosts iterate in name order. Dates keep first-seen order and are unique
/// per host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostMap {
    hosts: BTreeMap<String, Vec<String>>,
}

impl HostMap {
    /// Create an empty host map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a date for a host, ignoring duplicates.
    pub fn insert(&mut self, host: impl Into<String>, date: impl Into<String>) {
        let dates = self.hosts.entry(host.into()).or_default();
        let date = date.into();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    /// Record a log file name, returning false if it is not an ingest log name.
    pub fn insert_log_name(&mut self, name: &str) -> bool {
        match parse_log_name(name) {
            Some((host, date)) => {
                self.insert(host, date);
                true
            }
            None => false,
        }
    }

    /// Build a map from an iterator of log file names.
    pub fn from_log_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut map = Self::new();
        for name in names {
            map.insert_log_name(name);
        }
        map
    }

    /// Walk the ingest folders below `root` and collect every log file name.
    ///
    /// Missing folders are skipped. Unreadable entries inside an existing
    /// folder are reported as errors.
    pub fn scan_ingest_root(root: &Path) -> io::Result<Self> {
        let mut map = Self::new();
        for folder in INGEST_FOLDERS {
            let dir = root.join(folder);
            if dir.is_dir() {
                collect_log_names(&dir, &mut map)?;
            }
        }
        Ok(map)
    }

    /// Host names in order.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    /// Dates recorded for one host.
    pub fn dates_for(&self, host: &str) -> &[String] {
        self.hosts.get(host).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of all hosts' dates, in host order then first-seen order.
    pub fn all_dates(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for date in self.hosts.values().flatten() {
            if !seen.contains(&date.as_str()) {
                seen.push(date);
            }
        }
        seen
    }

    /// Iterate `(host, dates)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.hosts.iter().map(|(h, d)| (h.as_str(), d.as_slice()))
    }

    /// Number of hosts.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Returns true if no host is known.
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Split `<host>--<date>.logs.txt` into its host and date.
///
/// Only the first two `--`-separated parts are used; anything after a second
/// separator is ignored.
pub fn parse_log_name(name: &str) -> Option<(&str, &str)> {
    if !name.ends_with(LOG_FILE_SUFFIX) {
        return None;
    }
    let mut parts = name.split(NAME_SEPARATOR);
    let host = parts.next()?;
    let date = parts.next()?;
    let date = date.strip_suffix(LOG_FILE_SUFFIX).unwrap_or(date);
    if host.is_empty() || date.is_empty() {
        return None;
    }
    Some((host, date))
}

fn collect_log_names(dir: &Path, map: &mut HostMap) -> io::Result<()> {
    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_log_names(&path, map)?;
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            map.insert_log_name(name);
        }
    }
    Ok(())
}
