//! Generic tabular data model for ingested exports.
//!
//! Every dataset arrives as CSV with a schema we only partially control, so
//! tables keep their cells as strings and typed access happens at the edge
//! (see [`crate::schema`]). Rows are created once at ingestion and never
//! mutated afterwards, apart from the game tag applied while bucketing.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ordered, string-celled table read from one CSV export, or the
/// concatenation of several game exports of the same dataset type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads CSV bytes into a table.
    ///
    /// Headers are trimmed of surrounding whitespace. Ragged rows are
    /// padded or truncated to the header width rather than rejected.
    pub fn from_csv(name: &str, bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::unreadable_table(name, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(Error::unreadable_table(name, "no header row"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| Error::unreadable_table(name, e.to_string()))?;
            let mut row: Vec<String> = record.iter().map(|f| f.to_string()).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value by row index and header name.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Adds a column holding `value` on every row, overwriting it if a
    /// column of that name already exists. Used to tag rows with their game.
    pub fn set_column(&mut self, name: &str, value: &str) {
        match self.column(name) {
            Some(idx) => {
                for row in &mut self.rows {
                    row[idx] = value.to_string();
                }
            }
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(value.to_string());
                }
            }
        }
    }

    /// Appends another table's rows, aligning columns by header name.
    ///
    /// Headers unseen so far are added with empty backfill; cells missing
    /// from the appended table stay empty. Row order is preserved.
    pub fn append(&mut self, other: &Table) {
        if self.headers.is_empty() {
            *self = other.clone();
            return;
        }

        for header in &other.headers {
            if self.column(header).is_none() {
                self.headers.push(header.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        for other_row in &other.rows {
            let mut row = vec![String::new(); self.headers.len()];
            for (i, header) in other.headers.iter().enumerate() {
                if let Some(idx) = self.column(header) {
                    row[idx] = other_row[i].clone();
                }
            }
            self.rows.push(row);
        }
    }

    /// Returns a copy containing only rows whose `column` cell equals
    /// `value`. A table without that column filters to empty.
    pub fn filter_eq(&self, column: &str, value: &str) -> Table {
        let Some(idx) = self.column(column) else {
            return Table {
                headers: self.headers.clone(),
                rows: Vec::new(),
            };
        };
        Table {
            headers: self.headers.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| r[idx] == value)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b" Thrower , Receiver ,Distance (m)\nAlice,Bob,12.5\nBob,Cara,4.0\n";

    #[test]
    fn reads_csv_and_trims_headers() {
        let table = Table::from_csv("test.csv", CSV).unwrap();
        assert_eq!(table.headers(), &["Thrower", "Receiver", "Distance (m)"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "Thrower"), Some("Alice"));
        assert_eq!(table.value(1, "Distance (m)"), Some("4.0"));
    }

    #[test]
    fn set_column_adds_and_overwrites() {
        let mut table = Table::from_csv("test.csv", CSV).unwrap();
        table.set_column("Game", "Ice Cats");
        assert_eq!(table.value(1, "Game"), Some("Ice Cats"));
        table.set_column("Game", "Riverdale");
        assert_eq!(table.value(0, "Game"), Some("Riverdale"));
        assert_eq!(table.headers().len(), 4);
    }

    #[test]
    fn append_aligns_columns_by_name() {
        let mut a = Table::from_csv("a.csv", b"X,Y\n1,2\n").unwrap();
        let b = Table::from_csv("b.csv", b"Y,Z\n3,4\n").unwrap();
        a.append(&b);
        assert_eq!(a.headers(), &["X", "Y", "Z"]);
        assert_eq!(a.len(), 2);
        assert_eq!(a.value(1, "Y"), Some("3"));
        assert_eq!(a.value(1, "X"), Some(""));
        assert_eq!(a.value(0, "Z"), Some(""));
    }

    #[test]
    fn append_into_empty_clones() {
        let mut a = Table::default();
        let b = Table::from_csv("b.csv", CSV).unwrap();
        a.append(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.headers(), b.headers());
    }

    #[test]
    fn filter_eq_selects_matching_rows() {
        let table = Table::from_csv("test.csv", CSV).unwrap();
        let filtered = table.filter_eq("Thrower", "Bob");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.value(0, "Receiver"), Some("Cara"));

        let missing = table.filter_eq("Nope", "x");
        assert!(missing.is_empty());
    }

    #[test]
    fn empty_content_is_unreadable() {
        let err = Table::from_csv("empty.csv", b"").unwrap_err();
        assert!(matches!(err, Error::UnreadableTable { .. }));
    }
}
