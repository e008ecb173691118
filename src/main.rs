use anyhow::{bail, ensure, Context, Result};
use dictcsv::{
    read_fieldnames_with, read_rows_indexed_with, read_rows_with, write_rows_with, CsvOptions, Row,
};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const FIELDS: [&str; 3] = ["ID", "Name", "Score"];

fn students() -> Vec<Row> {
    [
        ("101", "Dharani", "95"),
        ("102", "Arun", "88"),
        ("103", "Priya", "92"),
    ]
    .iter()
    .map(|(id, name, score)| {
        FIELDS
            .iter()
            .zip([id, name, score])
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect()
    })
    .collect()
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    // ─── 2) options & output path ────────────────────────────────────
    // usage: dictcsv [OUTPUT_CSV] [OPTIONS_YAML]
    let mut args = env::args_os().skip(1);
    let output = args.next();
    let options = match args.next() {
        Some(p) => CsvOptions::from_yaml_file(&p)
            .with_context(|| format!("loading options from {:?}", p))?,
        None => CsvOptions::default(),
    };

    // keep the temp dir alive until the checks are done
    let (_tmp, path) = match output {
        Some(arg) => (None, PathBuf::from(arg)),
        None => {
            let tmp = tempfile::tempdir().context("creating temp dir")?;
            let path = tmp.path().join("students.csv");
            (Some(tmp), path)
        }
    };
    info!(path = %path.display(), "self-test");

    // ─── 3) write ────────────────────────────────────────────────────
    let data = students();
    write_rows_with(&path, &data, &FIELDS, &options)
        .with_context(|| format!("writing {}", path.display()))?;

    // ─── 4) read back & compare ──────────────────────────────────────
    let names = read_fieldnames_with(&path, &options).context("reading field names")?;
    ensure!(names == FIELDS, "field names {:?} != {:?}", names, FIELDS);

    let rows = read_rows_with(&path, &options).context("reading rows")?;
    ensure!(rows == data, "rows read back differ from rows written");

    let nested = read_rows_indexed_with(&path, "ID", &options).context("reading indexed rows")?;
    for (id, field, expected) in [("101", "Name", "Dharani"), ("102", "Score", "88")] {
        match nested.get(id).and_then(|row| row.get(field)) {
            Some(value) if value == expected => {}
            other => bail!("nested[{}][{}] = {:?}, expected {:?}", id, field, other, expected),
        }
    }

    info!(rows = rows.len(), "all checks passed");
    Ok(())
}
