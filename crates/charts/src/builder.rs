//! Chart orchestration: per-dataset handlers behind a registry.
//!
//! Each dataset type that yields charts registers one handler with a uniform
//! signature; adding a chartable dataset is a registry entry, not another
//! branch in a dispatch chain. Handlers return plain structured data for the
//! rendering collaborator.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, warn};

use engine_core::schema::{COL_GAME, COL_RECEIVER, COL_THROWER};
use engine_core::{DatasetType, Result, Table};
use ingest::Session;

use crate::classify::{legend, EventClassifier, Perspective, TouchMap};
use crate::geometry::FieldBounds;
use crate::playtime::{self, PlaytimeMatrix};

/// Which game a chart request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameScope {
    All,
    One(String),
}

/// Which entity a chart request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Team,
    Player(String),
}

/// One chart request: a game and an entity.
#[derive(Debug, Clone)]
pub struct ChartScope {
    pub game: GameScope,
    pub entity: Selection,
}

impl ChartScope {
    pub fn team() -> Self {
        Self {
            game: GameScope::All,
            entity: Selection::Team,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self {
            game: GameScope::All,
            entity: Selection::Player(name.into()),
        }
    }

    pub fn in_game(mut self, game: impl Into<String>) -> Self {
        self.game = GameScope::One(game.into());
        self
    }
}

/// One renderable chart.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    TouchMap(TouchMap),
    Playtime(PlaytimeMatrix),
}

type ChartHandler = fn(&ChartDataBuilder, &Session, &ChartScope) -> Result<Vec<Chart>>;

/// Orchestrates classification and aggregation for chart requests against
/// one session.
pub struct ChartDataBuilder {
    classifier: EventClassifier,
    registry: Vec<(DatasetType, ChartHandler)>,
}

impl ChartDataBuilder {
    pub fn new(bounds: FieldBounds) -> Self {
        Self {
            classifier: EventClassifier::new(bounds),
            registry: vec![
                (DatasetType::Passes, Self::touchmap_charts),
                (DatasetType::PlayerStats, Self::playtime_charts),
            ],
        }
    }

    /// Players appearing in the Passes table as thrower or receiver,
    /// name-sorted.
    pub fn players(&self, session: &Session) -> Vec<String> {
        let Some(passes) = session.table(DatasetType::Passes) else {
            return Vec::new();
        };
        let mut players = BTreeSet::new();
        for column in [COL_THROWER, COL_RECEIVER] {
            if let Some(idx) = passes.column(column) {
                for row in passes.rows() {
                    let name = row[idx].trim();
                    if !name.is_empty() {
                        players.insert(name.to_string());
                    }
                }
            }
        }
        players.into_iter().collect()
    }

    /// Display title for a chart request.
    pub fn title(&self, scope: &ChartScope) -> String {
        match (&scope.entity, &scope.game) {
            (Selection::Team, GameScope::All) => "Team Stats".to_string(),
            (Selection::Team, GameScope::One(game)) => format!("Team Stats vs. {game}"),
            (Selection::Player(player), GameScope::All) => player.clone(),
            (Selection::Player(player), GameScope::One(game)) => {
                format!("{player} vs. {game}")
            }
        }
    }

    /// Runs every registered handler for the scope.
    ///
    /// Datasets absent from the session or empty after filtering simply
    /// contribute no charts; an empty result means "no charts available",
    /// never an error.
    pub fn charts(&self, session: &Session, scope: &ChartScope) -> Result<Vec<Chart>> {
        if let GameScope::One(game) = &scope.game {
            if !session.games().iter().any(|g| g == game) {
                return Err(engine_core::Error::UnknownGame(game.clone()));
            }
        }

        let mut charts = Vec::new();
        for (dataset, handler) in &self.registry {
            if session.table(*dataset).map_or(true, Table::is_empty) {
                continue;
            }
            match handler(self, session, scope) {
                Ok(built) => charts.extend(built),
                // A structurally deficient table costs its own charts, not
                // the whole request.
                Err(err @ engine_core::Error::MissingColumn { .. }) => {
                    warn!(dataset = %dataset, %err, "skipping charts for deficient table");
                }
                Err(err) => return Err(err),
            }
        }
        debug!(count = charts.len(), title = %self.title(scope), "built charts");
        Ok(charts)
    }

    /// Passes handler: four touch-maps (both perspectives, absolute and
    /// origin-relative) for the selected player or the whole team.
    fn touchmap_charts(&self, session: &Session, scope: &ChartScope) -> Result<Vec<Chart>> {
        let passes = match session.table(DatasetType::Passes) {
            Some(table) => table,
            None => return Ok(Vec::new()),
        };

        let scoped;
        let passes = match &scope.game {
            GameScope::All => passes,
            GameScope::One(game) => {
                scoped = passes.filter_eq(COL_GAME, game);
                &scoped
            }
        };
        if passes.is_empty() {
            return Ok(Vec::new());
        }

        let configs = [
            (Perspective::Throws, false),
            (Perspective::Receptions, false),
            (Perspective::Throws, true),
            (Perspective::Receptions, true),
        ];

        let mut charts = Vec::new();
        for (perspective, origin_relative) in configs {
            let segments = match &scope.entity {
                Selection::Team => {
                    self.classifier
                        .classify_all(passes, perspective, origin_relative)?
                }
                Selection::Player(player) => {
                    let mut by_player =
                        self.classifier.classify(passes, perspective, origin_relative)?;
                    by_player.remove(player).unwrap_or_default()
                }
            };
            if segments.is_empty() {
                continue;
            }
            charts.push(Chart::TouchMap(TouchMap {
                title: perspective.label().to_string(),
                perspective,
                origin_relative,
                segments,
                legend: legend(perspective),
            }));
        }
        Ok(charts)
    }

    /// Player Stats handler: the roster-wide playtime matrix. The all-games
    /// summary for an unscoped request, the per-point detail for one game.
    fn playtime_charts(&self, session: &Session, scope: &ChartScope) -> Result<Vec<Chart>> {
        // Playtime is a whole-roster view; player selections get their row
        // inside the matrix rather than a chart of their own.
        if scope.entity != Selection::Team {
            return Ok(Vec::new());
        }
        let stats = match session.table(DatasetType::PlayerStats) {
            Some(table) => table,
            None => return Ok(Vec::new()),
        };

        let matrix = match &scope.game {
            GameScope::All => playtime::all_games(stats)?,
            GameScope::One(game) => {
                let possessions = session.table(DatasetType::Possessions);
                playtime::single_game(stats, possessions, game)?
            }
        };
        if matrix.players.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Chart::Playtime(matrix)])
    }
}

impl Default for ChartDataBuilder {
    fn default() -> Self {
        Self::new(FieldBounds::default())
    }
}
