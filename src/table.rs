use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::Context;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StageError, StageResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A row type bound to a CSV header layout.
///
/// `COLUMNS` lists the headers the type reads and, for output tables, the
/// exact order it writes them in. Input files may carry extra columns.
pub trait CsvRecord: Serialize + DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

/// Rows of one input file plus the header names `T` does not read.
#[derive(Debug)]
pub struct Table<T> {
    pub rows: Vec<T>,
    /// Columns present in the file but outside `T::COLUMNS`, in file order.
    pub extra_columns: Vec<String>,
}

/// Loads every row of `path`, checking the header before any row is parsed.
pub fn read_records<T: CsvRecord>(path: &Path) -> StageResult<Vec<T>> {
    read_table(path).map(|table| table.rows)
}

/// Like [`read_records`], also reporting which input columns are not kept.
pub fn read_table<T: CsvRecord>(path: &Path) -> StageResult<Table<T>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(StageError::missing_file(path));
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("read {}", path.display()))
                .into());
        }
    };
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw[..]);

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(body);
    let headers = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?
        .clone();
    if let Some(column) = T::COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(StageError::missing_column(path, column));
    }
    let extra_columns = headers
        .iter()
        .filter(|h| !T::COLUMNS.contains(h))
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for row in reader.deserialize::<T>() {
        rows.push(row.with_context(|| format!("parse {}", path.display()))?);
    }
    log::debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(Table {
        rows,
        extra_columns,
    })
}

/// Writes `rows` as UTF-8 with a byte-order mark.
///
/// The table goes to a sibling temp file first and is renamed over `path`
/// once complete, so a failed write never leaves a truncated output.
pub fn write_records<T: CsvRecord>(path: &Path, rows: &[T]) -> StageResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp = path.with_extension("csv.tmp");
    if let Err(err) = write_to(&tmp, rows) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    log::debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn write_to<T: CsvRecord>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)
        .with_context(|| format!("write {}", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    writer
        .write_record(T::COLUMNS)
        .with_context(|| format!("write header of {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
