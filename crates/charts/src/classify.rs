//! Pass outcome classification and touch-map assembly.
//!
//! Each Passes row lands in exactly one of five outcome categories via a
//! strict top-to-bottom priority check, then becomes a line segment in field
//! coordinates. Segments are stable-sorted by a fixed draw-order key so the
//! rarer, more important outcomes render on top of routine completions.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use engine_core::schema::{PassColumns, PassRow};
use engine_core::{Result, Table};

use crate::geometry::{FieldBounds, Point};

/// Throws at or beyond this distance count as long completions.
pub const SHORT_PASS_METERS: f64 = 10.0;

// Outcome palette, shared with the rendering collaborator.
pub const RED: &str = "#e23d28";
pub const PURPLE: &str = "#df73ff";
pub const GREEN: &str = "#00ff40";
pub const LIGHT_BLUE: &str = "#89cff0";
pub const BLUE: &str = "#6495ed";

/// Whether segments are grouped from the thrower's or the receiver's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    Throws,
    Receptions,
}

impl Perspective {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Throws => "Throws",
            Self::Receptions => "Receptions",
        }
    }
}

/// Mutually exclusive pass outcome, declared in classification priority
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    ThrowerError,
    ReceiverError,
    Assist,
    Short,
    Long,
}

impl Outcome {
    /// All outcomes, priority-first.
    pub const ALL: [Outcome; 5] = [
        Outcome::ThrowerError,
        Outcome::ReceiverError,
        Outcome::Assist,
        Outcome::Short,
        Outcome::Long,
    ];

    /// Classifies one row: first matching condition wins, so a row with
    /// both an error flag and the assist flag is always an error.
    pub fn classify(row: &PassRow, short: bool) -> Self {
        if row.thrower_error {
            Self::ThrowerError
        } else if row.receiver_error {
            Self::ReceiverError
        } else if row.assist {
            Self::Assist
        } else if short {
            Self::Short
        } else {
            Self::Long
        }
    }

    /// Render color. Error attribution is cosmetic: a thrower error is red
    /// and a receiver error purple from either perspective.
    pub fn color(&self) -> &'static str {
        match self {
            Self::ThrowerError => RED,
            Self::ReceiverError => PURPLE,
            Self::Assist => GREEN,
            Self::Short => LIGHT_BLUE,
            Self::Long => BLUE,
        }
    }

    /// Legend label under the given perspective. The scoring pass is an
    /// "Assist" to the thrower and a "Goal" to the receiver.
    pub fn label(&self, perspective: Perspective) -> &'static str {
        match (self, perspective) {
            (Self::ThrowerError, _) => "Throwaway",
            (Self::ReceiverError, _) => "Drop",
            (Self::Assist, Perspective::Throws) => "Assist",
            (Self::Assist, Perspective::Receptions) => "Goal",
            (Self::Short, _) => "Short Pass",
            (Self::Long, _) => "Long Pass",
        }
    }

    /// Draw-order key: completions first, errors last, and the
    /// perspective's own error category on top of the other side's.
    pub fn z_order(&self, perspective: Perspective) -> u8 {
        match (self, perspective) {
            (Self::Long, _) => 0,
            (Self::Short, _) => 1,
            (Self::Assist, _) => 2,
            (Self::ReceiverError, Perspective::Throws) => 3,
            (Self::ThrowerError, Perspective::Throws) => 4,
            (Self::ThrowerError, Perspective::Receptions) => 3,
            (Self::ReceiverError, Perspective::Receptions) => 4,
        }
    }
}

/// One classified pass instance in field coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub outcome: Outcome,
    pub player: String,
    pub perspective: Perspective,
}

/// One legend row: label plus hex color.
#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Legend entries in display order: the perspective's salient error first,
/// routine completions last (reverse of draw order).
pub fn legend(perspective: Perspective) -> Vec<LegendEntry> {
    let mut outcomes = Outcome::ALL;
    outcomes.sort_by_key(|o| std::cmp::Reverse(o.z_order(perspective)));
    outcomes
        .into_iter()
        .map(|o| LegendEntry {
            label: o.label(perspective),
            color: o.color(),
        })
        .collect()
}

/// One touch-map chart: z-ordered segments plus legend.
#[derive(Debug, Clone, Serialize)]
pub struct TouchMap {
    pub title: String,
    pub perspective: Perspective,
    pub origin_relative: bool,
    pub segments: Vec<Segment>,
    pub legend: Vec<LegendEntry>,
}

/// Builds classified segments from the merged Passes table.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventClassifier {
    bounds: FieldBounds,
}

impl EventClassifier {
    pub fn new(bounds: FieldBounds) -> Self {
        Self { bounds }
    }

    /// One pass over the table producing classified segments in row order.
    ///
    /// Rows that fail typed parsing are skipped with a warning; one bad row
    /// never invalidates the dataset.
    fn segments(
        &self,
        table: &Table,
        perspective: Perspective,
        origin_relative: bool,
    ) -> Result<Vec<Segment>> {
        let cols = PassColumns::resolve(table)?;
        let mut segments = Vec::with_capacity(table.len());

        for index in 0..table.len() {
            let row = match cols.read(table, index) {
                Ok(row) => row,
                Err(err) => {
                    warn!(row = index, %err, "skipping malformed pass row");
                    continue;
                }
            };

            let player = match perspective {
                Perspective::Throws => row.thrower.clone(),
                Perspective::Receptions => row.receiver.clone(),
            };
            if player.is_empty() {
                continue;
            }

            // Short means little ground gained: under the distance
            // threshold, or thrown back toward our own endzone (projected
            // start above projected end).
            let abs_start = self.bounds.project(row.start_x, row.start_y);
            let abs_end = self.bounds.project(row.end_x, row.end_y);
            let short = row.distance < SHORT_PASS_METERS || abs_start.y > abs_end.y;

            let (start, end) = if origin_relative {
                self.bounds
                    .segment_relative(row.start_x, row.start_y, row.end_x, row.end_y)
            } else {
                (abs_start, abs_end)
            };

            segments.push(Segment {
                start,
                end,
                outcome: Outcome::classify(&row, short),
                player,
                perspective,
            });
        }

        Ok(segments)
    }

    /// Per-player segment lists for one perspective, each z-ordered.
    pub fn classify(
        &self,
        table: &Table,
        perspective: Perspective,
        origin_relative: bool,
    ) -> Result<BTreeMap<String, Vec<Segment>>> {
        let mut by_player: BTreeMap<String, Vec<Segment>> = BTreeMap::new();
        for segment in self.segments(table, perspective, origin_relative)? {
            by_player
                .entry(segment.player.clone())
                .or_default()
                .push(segment);
        }
        for segments in by_player.values_mut() {
            // Stable sort keeps row order within each outcome category.
            segments.sort_by_key(|s| s.outcome.z_order(perspective));
        }
        Ok(by_player)
    }

    /// All segments ungrouped (team view), z-ordered.
    pub fn classify_all(
        &self,
        table: &Table,
        perspective: Perspective,
        origin_relative: bool,
    ) -> Result<Vec<Segment>> {
        let mut segments = self.segments(table, perspective, origin_relative)?;
        segments.sort_by_key(|s| s.outcome.z_order(perspective));
        Ok(segments)
    }
}
