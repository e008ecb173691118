use std::{fs::File, io::Read, path::Path};

use csv::{Reader, StringRecord};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    config::CsvOptions,
    error::{DictCsvError, Result, READER_PATH},
    record::{zip_record, IndexedTable, Table},
};

/// Column names from the header row, exactly as written.
pub fn read_fieldnames<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    read_fieldnames_with(path, &CsvOptions::default())
}

#[tracing::instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn read_fieldnames_with<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Vec<String>> {
    let path = path.as_ref();
    let builder = options.reader_builder()?;
    let file = File::open(path).map_err(|e| DictCsvError::io(path, e))?;
    fieldnames(path, builder.from_reader(file))
}

pub fn read_fieldnames_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<String>> {
    let builder = options.reader_builder()?;
    fieldnames(Path::new(READER_PATH), builder.from_reader(reader))
}

/// Every data row as a field name → value map, in file order.
///
/// Short rows get the missing fields filled with `missing_value` (empty by
/// default); cells beyond the header are ignored.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<Table> {
    read_rows_with(path, &CsvOptions::default())
}

#[tracing::instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn read_rows_with<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Table> {
    let path = path.as_ref();
    let builder = options.reader_builder()?;
    let file = File::open(path).map_err(|e| DictCsvError::io(path, e))?;
    rows(path, builder.from_reader(file), options)
}

pub fn read_rows_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Table> {
    let builder = options.reader_builder()?;
    rows(Path::new(READER_PATH), builder.from_reader(reader), options)
}

/// Rows keyed by the value of `key_field`.
///
/// The key field stays in each row. When two rows share a key value the later
/// row wins; the key keeps the position of its first appearance.
pub fn read_rows_indexed<P: AsRef<Path>>(path: P, key_field: &str) -> Result<IndexedTable> {
    read_rows_indexed_with(path, key_field, &CsvOptions::default())
}

#[tracing::instrument(level = "debug", skip(path, options), fields(path = %path.as_ref().display()))]
pub fn read_rows_indexed_with<P: AsRef<Path>>(
    path: P,
    key_field: &str,
    options: &CsvOptions,
) -> Result<IndexedTable> {
    let path = path.as_ref();
    let builder = options.reader_builder()?;
    let file = File::open(path).map_err(|e| DictCsvError::io(path, e))?;
    rows_indexed(path, builder.from_reader(file), key_field, options)
}

pub fn read_rows_indexed_from_reader<R: Read>(
    reader: R,
    key_field: &str,
    options: &CsvOptions,
) -> Result<IndexedTable> {
    let builder = options.reader_builder()?;
    rows_indexed(Path::new(READER_PATH), builder.from_reader(reader), key_field, options)
}

fn header_record<R: Read>(path: &Path, rdr: &mut Reader<R>) -> Result<StringRecord> {
    let headers = rdr
        .headers()
        .map_err(|e| DictCsvError::from_csv(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(DictCsvError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    Ok(headers)
}

fn fieldnames<R: Read>(path: &Path, mut rdr: Reader<R>) -> Result<Vec<String>> {
    let headers = header_record(path, &mut rdr)?;
    Ok(headers.iter().map(str::to_string).collect())
}

fn rows<R: Read>(path: &Path, mut rdr: Reader<R>, options: &CsvOptions) -> Result<Table> {
    let headers = header_record(path, &mut rdr)?;
    let mut table = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| DictCsvError::from_csv(path, e))?;
        note_ragged(&headers, &record);
        table.push(zip_record(&headers, &record, &options.missing_value));
    }
    debug!(rows = table.len(), fields = headers.len(), "read rows");
    Ok(table)
}

fn rows_indexed<R: Read>(
    path: &Path,
    mut rdr: Reader<R>,
    key_field: &str,
    options: &CsvOptions,
) -> Result<IndexedTable> {
    let headers = header_record(path, &mut rdr)?;
    if !headers.iter().any(|h| h == key_field) {
        return Err(DictCsvError::UnknownKeyField {
            path: path.to_path_buf(),
            key_field: key_field.to_string(),
        });
    }

    let mut table = IndexMap::new();
    let mut replaced = 0usize;
    for result in rdr.records() {
        let record = result.map_err(|e| DictCsvError::from_csv(path, e))?;
        note_ragged(&headers, &record);
        let row = zip_record(&headers, &record, &options.missing_value);
        let key = row.get(key_field).cloned().unwrap_or_default();
        if table.insert(key, row).is_some() {
            replaced += 1;
        }
    }
    debug!(keys = table.len(), replaced, key_field, "read indexed rows");
    Ok(table)
}

fn note_ragged(headers: &StringRecord, record: &StringRecord) {
    if record.len() != headers.len() {
        let line = record.position().map(|p| p.line());
        debug!(?line, expected = headers.len(), found = record.len(), "ragged row");
    }
}
