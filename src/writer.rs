// =============================================================================
// writer.rs - PUTTING IT ON DISK
// =============================================================================
//
// Two outputs, written independently:
//
//   JSON - pretty array of records, 4-space indent.
//   CSV  - one flat row per item: Subreddit, Type, Title, Url, Scraped_at.
//          Topics first (empty Url), then discussions, record by record.
//
// Only records with at least one topic are written. A record that found
// discussions but no topics is dropped from BOTH files.
//
// Each file gets its own Result. If the JSON write blows up we still try
// the CSV, and vice versa; the caller just gets told which ones landed.
// =============================================================================

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{error, info};

use crate::config::Config;
use crate::error::WriteError;
use crate::models::SourceRecord;

pub const CSV_HEADER: [&str; 5] = ["Subreddit", "Type", "Title", "Url", "Scraped_at"];

/// What made it to disk.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub records_written: usize,
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.json.is_some() && self.csv.is_some()
    }
}

/// Records eligible for output, in their original order.
pub fn publishable(records: &[SourceRecord]) -> Vec<&SourceRecord> {
    records.iter().filter(|r| r.has_topics()).collect()
}

/// Filter, then write both files. Never fails; failures are logged and
/// reflected in the report.
pub fn save(records: &[SourceRecord], config: &Config) -> WriteReport {
    let keep = publishable(records);
    let dropped = records.len() - keep.len();
    if dropped > 0 {
        info!(dropped = dropped, "Records without topics left out of the output");
    }

    let mut report = WriteReport {
        records_written: keep.len(),
        ..WriteReport::default()
    };

    match write_json(&config.json_path, &keep) {
        Ok(()) => {
            println!("Python Topics saved: {}", config.json_path.display());
            report.json = Some(config.json_path.clone());
        }
        Err(e) => {
            error!(error = %e, "JSON output failed");
            println!("Error while saving data: {e}");
        }
    }

    match write_csv(&config.csv_path, &keep) {
        Ok(()) => {
            println!("Python topics saved to CSV file: {}", config.csv_path.display());
            report.csv = Some(config.csv_path.clone());
        }
        Err(e) => {
            error!(error = %e, "CSV output failed");
            println!("Error while saving data: {e}");
        }
    }

    report
}

/// Overwrite `path` with a pretty-printed JSON array of `records`.
pub fn write_json(path: &Path, records: &[&SourceRecord]) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .map_err(|source| WriteError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    out.flush().map_err(io_err)
}

/// Overwrite `path` with the flattened CSV view of `records`.
pub fn write_csv(path: &Path, records: &[&SourceRecord]) -> Result<(), WriteError> {
    let csv_err = |source| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(CSV_HEADER).map_err(csv_err)?;

    for record in records {
        for topic in &record.topics {
            writer
                .write_record([
                    record.source_name.as_str(),
                    topic.kind.as_str(),
                    topic.title.as_str(),
                    "",
                    record.scraped_at.as_str(),
                ])
                .map_err(csv_err)?;
        }
        for discussion in &record.discussions {
            writer
                .write_record([
                    record.source_name.as_str(),
                    discussion.kind.as_str(),
                    discussion.title.as_str(),
                    discussion.url.as_str(),
                    record.scraped_at.as_str(),
                ])
                .map_err(csv_err)?;
        }
    }

    writer.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
