//! Immutable session data assembled from one upload batch.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use engine_core::{DatasetType, Table};

/// Opponents seen in a batch and the dataset types each one provided.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GameCatalog {
    games: BTreeMap<String, BTreeSet<DatasetType>>,
}

impl GameCatalog {
    pub fn record(&mut self, opponent: &str, dataset: DatasetType) {
        self.games
            .entry(opponent.to_string())
            .or_default()
            .insert(dataset);
    }

    /// Opponents in name-sorted order.
    pub fn opponents(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    /// Dataset types the opponent's export batch is missing, in enum order.
    pub fn missing_types(&self, opponent: &str) -> Vec<DatasetType> {
        let present = self.games.get(opponent);
        DatasetType::ALL
            .into_iter()
            .filter(|t| present.map_or(true, |set| !set.contains(t)))
            .collect()
    }

    /// A complete game has all six dataset types.
    pub fn is_complete(&self, opponent: &str) -> bool {
        self.missing_types(opponent).is_empty()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// The immutable merged dataset produced from one upload batch.
///
/// Built once by [`crate::SessionBuilder`] and only read afterwards; the
/// session is the unit of caching for chart requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tables: HashMap<DatasetType, Table>,
    games: GameCatalog,
    warnings: Vec<String>,
}

impl Session {
    pub(crate) fn new(
        tables: HashMap<DatasetType, Table>,
        games: GameCatalog,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            tables,
            games,
            warnings,
        }
    }

    /// The merged table for a dataset type, if any file of that type was
    /// ingested.
    pub fn table(&self, dataset: DatasetType) -> Option<&Table> {
        self.tables.get(&dataset)
    }

    pub fn catalog(&self) -> &GameCatalog {
        &self.games
    }

    /// Games present in the session, name-sorted.
    pub fn games(&self) -> Vec<String> {
        self.games.opponents().map(str::to_string).collect()
    }

    /// Warnings collected at ingestion, in emission order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
