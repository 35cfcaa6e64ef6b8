//! Newline-delimited JSON readers for model output files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Decode every non-blank line of a JSONL file as `T`.
///
/// Stops at the first malformed line and reports it as [`Error::Parse`]
/// with the 1-based line number.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    Ok(read_numbered(path)?.into_iter().map(|(_, record)| record).collect())
}

fn read_numbered<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut records = Vec::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            message: e.to_string(),
        })?;
        records.push((idx + 1, record));
    }

    Ok(records)
}

/// Read a JSONL file into untyped JSON values.
pub fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    read_records(path)
}

/// Load a JSONL file into a map keyed by each record's `page_id`.
///
/// The `page_id` field is removed from the stored values. Later records
/// with the same id replace earlier ones.
pub fn jsonl_to_map(path: &Path) -> Result<BTreeMap<String, Map<String, Value>>> {
    let records: Vec<(usize, Map<String, Value>)> = read_numbered(path)?;
    let mut loaded = BTreeMap::new();

    for (line, mut record) in records {
        let Some(Value::String(page_id)) = record.remove("page_id") else {
            return Err(Error::Parse {
                path: path.to_path_buf(),
                line,
                message: "record has no string \"page_id\" field".into(),
            });
        };
        loaded.insert(page_id, record);
    }

    Ok(loaded)
}
