use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::model::{Row, Table};
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the indicator table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma separated, header row
/// * `.tsv`, `.txt` – tab separated, header row
/// * `.json`        – `[{ "Country": "...", "Year": 2000, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Table, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv_reader(open(path)?, b',')?,
        "tsv" | "txt" => load_csv_reader(open(path)?, b'\t')?,
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            load_json_str(&text)?
        }
        other => return Err(DataLoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} rows ({} countries, years {}..={}) from {}",
        table.len(),
        table.distinct_countries().len(),
        table.year_min(),
        table.year_max(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<std::fs::File, DataLoadError> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row with column names; `Country`, `Year` and the four indicator
/// columns are required, anything else is ignored.
/// Empty indicator cells load as missing values.
pub fn load_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Table, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for required in Row::required_columns() {
        if !headers.iter().any(|h| h == required) {
            return Err(DataLoadError::MissingColumn(required));
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<Row>().enumerate() {
        let row = result.map_err(|e| DataLoadError::InvalidRow {
            row: row_no,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    Table::from_rows(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Country": "Russian Federation",
///     "Year": 2000,
///     "Life expectancy (men)": 59.0,
///     "Life expectancy(women)": 72.3,
///     "Infant deaths": 21.0,
///     "Alcohol": null
///   },
///   ...
/// ]
/// ```
///
/// Every record must carry every required key; `null` means missing.
pub fn load_json_str(text: &str) -> Result<Table, DataLoadError> {
    let root: JsonValue = serde_json::from_str(text)?;

    let records = root.as_array().ok_or_else(|| DataLoadError::InvalidRow {
        row: 0,
        reason: "expected top-level JSON array".to_string(),
    })?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| DataLoadError::InvalidRow {
            row: i,
            reason: "not a JSON object".to_string(),
        })?;

        for required in Row::required_columns() {
            if !obj.contains_key(required) {
                return Err(DataLoadError::MissingColumn(required));
            }
        }

        let row: Row = serde_json::from_value(rec.clone()).map_err(|e| {
            DataLoadError::InvalidRow {
                row: i,
                reason: e.to_string(),
            }
        })?;
        rows.push(row);
    }

    Table::from_rows(rows)
}
