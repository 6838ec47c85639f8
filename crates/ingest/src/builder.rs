//! Batch ingestion: filename classification, per-game bucketing, and
//! completeness validation.
//!
//! Ingestion never aborts on one bad file. Unrecognized names and unreadable
//! tables turn into warnings and the rest of the batch proceeds, so the
//! caller always gets either derived data or a populated warnings list.

use std::collections::HashMap;

use tracing::{debug, warn};

use engine_core::{parse_filename, schema::COL_GAME, DatasetType, Table};

use crate::session::{GameCatalog, Session};

/// Assembles one [`Session`] from an ordered batch of uploaded files.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    buckets: HashMap<(String, DatasetType), Table>,
    /// Opponents in first-seen order; merge order follows this, not name
    /// order.
    seen: Vec<String>,
    catalog: GameCatalog,
    warnings: Vec<String>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one uploaded file.
    ///
    /// A file that fails filename or CSV parsing is skipped with a warning.
    /// A duplicate (opponent, dataset) submission replaces the earlier one.
    pub fn add_file(&mut self, filename: &str, bytes: &[u8]) {
        let parsed = match parse_filename(filename) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(file = filename, %err, "skipping file with unrecognized name");
                self.warnings.push(format!(
                    "Skipped {filename:?}: file name does not match \
                     \"<dataset> vs. <opponent> <YYYY-MM-DD_HH-MM-SS>\""
                ));
                return;
            }
        };

        let mut table = match Table::from_csv(filename, bytes) {
            Ok(table) => table,
            Err(err) => {
                warn!(file = filename, %err, "skipping unreadable table");
                self.warnings
                    .push(format!("Skipped {filename:?}: {err}"));
                return;
            }
        };

        table.set_column(COL_GAME, &parsed.opponent);

        if !self.seen.contains(&parsed.opponent) {
            self.seen.push(parsed.opponent.clone());
        }
        self.catalog.record(&parsed.opponent, parsed.dataset);

        debug!(
            file = filename,
            dataset = %parsed.dataset,
            opponent = %parsed.opponent,
            rows = table.len(),
            "ingested table"
        );

        // Last write wins on duplicate submissions of the same export.
        let key = (parsed.opponent.clone(), parsed.dataset);
        if self.buckets.insert(key, table).is_some() {
            warn!(
                dataset = %parsed.dataset,
                opponent = %parsed.opponent,
                "duplicate upload replaces earlier table"
            );
        }
    }

    /// Validates completeness, merges per-type tables across games, and
    /// seals the session.
    pub fn finish(mut self) -> Session {
        // One warning per incomplete opponent, in opponent-name order.
        for opponent in self.catalog.opponents() {
            let missing = self.catalog.missing_types(opponent);
            if !missing.is_empty() {
                let labels: Vec<_> = missing.iter().map(|t| t.label()).collect();
                self.warnings.push(format!(
                    "{opponent}: missing {}",
                    labels.join(", ")
                ));
            }
        }

        // Concatenate per dataset type, opponents in first-seen order so
        // merged row order matches upload order.
        let mut tables: HashMap<DatasetType, Table> = HashMap::new();
        for opponent in &self.seen {
            for dataset in DatasetType::ALL {
                if let Some(table) = self.buckets.remove(&(opponent.clone(), dataset)) {
                    tables.entry(dataset).or_default().append(&table);
                }
            }
        }

        Session::new(tables, self.catalog, self.warnings)
    }

    /// Convenience for one-shot batches.
    pub fn build<'a, I>(files: I) -> Session
    where
        I: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut builder = Self::new();
        for (name, bytes) in files {
            builder.add_file(name, bytes);
        }
        builder.finish()
    }
}
