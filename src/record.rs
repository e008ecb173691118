use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, HashMap},
    fmt::Display,
    hash::{BuildHasher, Hash},
};

use csv::StringRecord;
use indexmap::IndexMap;

/// One data row: field name → cell text, in header order.
pub type Row = IndexMap<String, String>;

/// Every data row of a file, in file order.
pub type Table = Vec<Row>;

/// Rows keyed by the value of one field.
pub type IndexedTable = IndexMap<String, Row>;

/// Anything the writer can pull a named cell out of.
///
/// Values are rendered through `Display`, so numbers and other non-text
/// values come back as text when the file is read again.
pub trait RowSource {
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<K, V, S> RowSource for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Display,
    S: BuildHasher,
{
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Owned(v.to_string()))
    }
}

impl<K, V, S> RowSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Display,
    S: BuildHasher,
{
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Owned(v.to_string()))
    }
}

impl<K, V> RowSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Owned(v.to_string()))
    }
}

/// Pair each header with its cell. Short records get `fill` for the missing
/// cells; cells past the last header are dropped. A repeated header keeps the
/// later column's value.
pub(crate) fn zip_record(headers: &StringRecord, record: &StringRecord, fill: &str) -> Row {
    let mut row = IndexMap::with_capacity(headers.len());
    for (i, name) in headers.iter().enumerate() {
        let value = record.get(i).unwrap_or(fill);
        row.insert(name.to_string(), value.to_string());
    }
    row
}
