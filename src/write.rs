use std::{fs::File, io::Write, path::Path};

use csv::Writer;
use tracing::debug;

use crate::{
    config::CsvOptions,
    error::{DictCsvError, Result, READER_PATH},
    record::RowSource,
};

/// Write a header of `field_names` followed by one record per row.
///
/// `field_names` decides both column order and which fields are emitted:
/// fields a row lacks are written as `missing_value` (empty by default) and
/// fields not listed are dropped. An empty `field_names` is rejected with
/// [`DictCsvError::EmptyFieldNames`] before the file is created. An existing
/// file is truncated. The write is not atomic, so a failure part way through
/// leaves a partial file behind.
pub fn write_rows<P, R, F>(path: P, rows: &[R], field_names: &[F]) -> Result<()>
where
    P: AsRef<Path>,
    R: RowSource,
    F: AsRef<str>,
{
    write_rows_with(path, rows, field_names, &CsvOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display(), rows = rows.len()))]
pub fn write_rows_with<P, R, F>(
    path: P,
    rows: &[R],
    field_names: &[F],
    options: &CsvOptions,
) -> Result<()>
where
    P: AsRef<Path>,
    R: RowSource,
    F: AsRef<str>,
{
    let path = path.as_ref();
    let builder = options.writer_builder()?;
    check_field_names(path, field_names)?;
    let file = File::create(path).map_err(|e| DictCsvError::io(path, e))?;
    emit(path, builder.from_writer(file), rows, field_names, options)
}

/// Same as [`write_rows_with`] but into any writer. The writer is flushed
/// before returning.
pub fn write_rows_to_writer<W, R, F>(
    writer: W,
    rows: &[R],
    field_names: &[F],
    options: &CsvOptions,
) -> Result<()>
where
    W: Write,
    R: RowSource,
    F: AsRef<str>,
{
    let builder = options.writer_builder()?;
    check_field_names(Path::new(READER_PATH), field_names)?;
    emit(
        Path::new(READER_PATH),
        builder.from_writer(writer),
        rows,
        field_names,
        options,
    )
}

// A header with no columns would be written as a single empty field and read
// back as a column named "".
fn check_field_names<F>(path: &Path, field_names: &[F]) -> Result<()> {
    if field_names.is_empty() {
        return Err(DictCsvError::EmptyFieldNames {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn emit<W, R, F>(
    path: &Path,
    mut wtr: Writer<W>,
    rows: &[R],
    field_names: &[F],
    options: &CsvOptions,
) -> Result<()>
where
    W: Write,
    R: RowSource,
    F: AsRef<str>,
{
    wtr.write_record(field_names.iter().map(AsRef::<str>::as_ref))
        .map_err(|e| DictCsvError::from_csv(path, e))?;

    let mut record: Vec<String> = Vec::with_capacity(field_names.len());
    let mut filled = 0usize;
    for row in rows {
        record.clear();
        for name in field_names {
            match row.field(name.as_ref()) {
                Some(value) => record.push(value.into_owned()),
                None => {
                    filled += 1;
                    record.push(options.missing_value.clone());
                }
            }
        }
        wtr.write_record(&record)
            .map_err(|e| DictCsvError::from_csv(path, e))?;
    }

    wtr.flush().map_err(|e| DictCsvError::io(path, e))?;
    debug!(rows = rows.len(), fields = field_names.len(), filled, "wrote rows");
    Ok(())
}
