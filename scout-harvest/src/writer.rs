//! Tabular output.
use scout_common::{Record, Result, ScoutError};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const NOT_FOUND: &str = "Not found";
pub const LIST_SEPARATOR: &str = "; ";
pub const SECONDARY_SUFFIX: &str = "_google_sheets";

pub const HEADERS: [&str; 5] = [
    "Company Name",
    "Batch",
    "Short Description",
    "Founder Name(s)",
    "Founder LinkedIn URL(s)",
];

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "Company Name")]
    name: &'a str,
    #[serde(rename = "Batch")]
    batch: &'a str,
    #[serde(rename = "Short Description")]
    description: &'a str,
    #[serde(rename = "Founder Name(s)")]
    founders: String,
    #[serde(rename = "Founder LinkedIn URL(s)")]
    linkedin_urls: String,
}

impl<'a> From<&'a Record> for OutputRow<'a> {
    fn from(r: &'a Record) -> Self {
        Self {
            name: &r.name,
            batch: &r.batch,
            description: &r.description,
            founders: join_or_not_found(&r.founders),
            linkedin_urls: join_or_not_found(&r.linkedin_urls),
        }
    }
}

fn join_or_not_found(values: &[String]) -> String {
    if values.is_empty() {
        NOT_FOUND.to_string()
    } else {
        values.join(LIST_SEPARATOR)
    }
}

/// Paths and row count of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutput {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub rows: usize,
}

/// `<dir>/<stem>_google_sheets.csv` next to `primary`.
pub fn secondary_path(primary: &Path) -> PathBuf {
    let stem = primary
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    primary.with_file_name(format!("{stem}{SECONDARY_SUFFIX}.csv"))
}

/// Write `records` to `primary` and to its secondary copy.
///
/// Returns `Ok(None)` without touching the filesystem when there is
/// nothing to write.
pub fn write_records(records: &[Record], primary: &Path) -> Result<Option<WrittenOutput>> {
    if records.is_empty() {
        tracing::warn!(target: "harvest.writer", "No data to save");
        return Ok(None);
    }

    if let Some(parent) = primary.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ScoutError::Output(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    write_csv(records, primary)?;
    tracing::info!(
        target: "harvest.writer",
        path = %primary.display(),
        rows = records.len(),
        "Data saved"
    );

    let secondary = secondary_path(primary);
    write_csv(records, &secondary)?;
    tracing::info!(
        target: "harvest.writer",
        path = %secondary.display(),
        "Google Sheets copy saved"
    );

    Ok(Some(WrittenOutput {
        primary: primary.to_path_buf(),
        secondary,
        rows: records.len(),
    }))
}

fn write_csv(records: &[Record], path: &Path) -> Result<()> {
    let output_err = |e: csv::Error| ScoutError::Output(format!("{}: {e}", path.display()));

    let mut writer = csv::Writer::from_path(path).map_err(output_err)?;
    for record in records {
        writer.serialize(OutputRow::from(record)).map_err(output_err)?;
    }
    writer
        .flush()
        .map_err(|e| ScoutError::Output(format!("{}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        let mut with_founders = Record::new("Acme Corp", "S21", "We build widgets for warehouses");
        with_founders.push_founder("Jane Doe");
        with_founders.push_founder("John Roe");
        with_founders
            .linkedin_urls
            .push("https://www.linkedin.com/in/janedoe".into());
        vec![
            with_founders,
            Record::new("Widgetly", "Unknown", "Fleet payments, simplified"),
        ]
    }

    #[test]
    fn empty_collection_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out.csv");
        assert!(write_records(&[], &path).unwrap().is_none());
        assert!(!path.exists());
        assert!(!secondary_path(&path).exists());
    }

    #[test]
    fn secondary_copy_is_named_after_primary() {
        assert_eq!(
            secondary_path(Path::new("data/yc_startups.csv")),
            PathBuf::from("data/yc_startups_google_sheets.csv")
        );
    }

    #[test]
    fn rows_round_trip_with_not_found_sentinel() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("yc_startups.csv");
        let records = sample();

        let written = write_records(&records, &path).unwrap().unwrap();
        assert_eq!(written.rows, 2);

        for file in [&written.primary, &written.secondary] {
            let mut reader = csv::Reader::from_path(file).unwrap();
            let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
            assert_eq!(headers, HEADERS);

            let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
            assert_eq!(rows.len(), records.len());
            assert_eq!(&rows[0][3], "Jane Doe; John Roe");
            assert_eq!(&rows[0][4], "https://www.linkedin.com/in/janedoe");
            assert_eq!(&rows[1][3], NOT_FOUND);
            assert_eq!(&rows[1][4], NOT_FOUND);
            assert_eq!(&rows[1][2], "Fleet payments, simplified");
        }
    }
}
