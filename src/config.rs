use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{DictCsvError, Result};

/// Line ending written after each record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
}

impl LineTerminator {
    fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::Crlf => csv::Terminator::CRLF,
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

/// Dialect and fill settings shared by the readers and the writer.
///
/// The defaults describe conventional comma-separated files with double-quote
/// quoting. Any field left out of a YAML document keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvOptions {
    pub delimiter: char,
    pub quote: char,
    pub line_terminator: LineTerminator,
    /// Value used for fields a row does not provide, both when reading short
    /// rows and when writing rows that lack a field.
    pub missing_value: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            line_terminator: LineTerminator::default(),
            missing_value: String::new(),
        }
    }
}

impl CsvOptions {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let options: CsvOptions = serde_yaml::from_str(text)
            .map_err(|e| DictCsvError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DictCsvError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Delimiter and quote must be single ASCII bytes and must differ.
    pub fn validate(&self) -> Result<()> {
        let delimiter = ascii_byte("delimiter", self.delimiter)?;
        let quote = ascii_byte("quote", self.quote)?;
        if delimiter == quote {
            return Err(DictCsvError::InvalidOptions(format!(
                "delimiter and quote are both {:?}",
                self.delimiter
            )));
        }
        if matches!(delimiter, b'\r' | b'\n') || matches!(quote, b'\r' | b'\n') {
            return Err(DictCsvError::InvalidOptions(
                "delimiter and quote cannot be line breaks".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn reader_builder(&self) -> Result<csv::ReaderBuilder> {
        self.validate()?;
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter as u8)
            .quote(self.quote as u8);
        Ok(builder)
    }

    pub(crate) fn writer_builder(&self) -> Result<csv::WriterBuilder> {
        self.validate()?;
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .flexible(false)
            .delimiter(self.delimiter as u8)
            .quote(self.quote as u8)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(self.line_terminator.to_csv());
        Ok(builder)
    }
}

fn ascii_byte(name: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(DictCsvError::InvalidOptions(format!(
            "{} {:?} is not a single ASCII character",
            name, c
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let options = CsvOptions::default();
        assert_eq!(options.delimiter, ',');
        assert_eq!(options.quote, '"');
        assert_eq!(options.line_terminator, LineTerminator::Crlf);
        assert_eq!(options.missing_value, "");
        options.validate().unwrap();
    }

    #[test]
    fn test_yaml_partial() {
        let options = CsvOptions::from_yaml_str("delimiter: \";\"\nline_terminator: lf\n").unwrap();
        assert_eq!(options.delimiter, ';');
        assert_eq!(options.quote, '"');
        assert_eq!(options.line_terminator, LineTerminator::Lf);
    }

    #[test]
    fn test_yaml_unknown_field() {
        let err = CsvOptions::from_yaml_str("separator: \";\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "missing_value: \"N/A\"").unwrap();
        let options = CsvOptions::from_yaml_file(file.path()).unwrap();
        assert_eq!(options.missing_value, "N/A");
        assert_eq!(options.delimiter, ',');
    }

    #[test]
    fn test_validate_rejects() {
        let options = CsvOptions {
            delimiter: '§',
            ..CsvOptions::default()
        };
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Config);

        let options = CsvOptions {
            quote: ',',
            ..CsvOptions::default()
        };
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Config);

        let options = CsvOptions {
            delimiter: '\n',
            ..CsvOptions::default()
        };
        assert_eq!(options.validate().unwrap_err().kind(), ErrorKind::Config);
    }
}
