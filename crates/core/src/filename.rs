//! Filename-driven dataset classification.
//!
//! The stat exporter names every file
//! `"<DatasetType> vs. <Opponent> <YYYY-MM-DD_HH-MM-SS>[.csv]"`. The name is
//! the only place the dataset type and opponent are recorded, so parsing it
//! is the first ingestion stage.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::dataset::DatasetType;
use crate::error::{Error, Result};

/// Timestamp format the exporter embeds in file names.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

// The opponent group is non-greedy and anchored by the trailing timestamp,
// not by the "vs." token: opponent names may themselves contain "vs." and
// must not be truncated at it.
static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)(.+?) vs\. (.+?) (\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2})(?:\.\w+)?$")
        .expect("filename pattern is valid")
});

/// Parsed identity of one exported file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFilename {
    pub dataset: DatasetType,
    pub opponent: String,
    pub exported_at: NaiveDateTime,
}

/// Classifies an uploaded file by name.
///
/// Fails with [`Error::UnrecognizedFilename`] when the pattern does not
/// match or the dataset token is outside the closed [`DatasetType`] set.
pub fn parse_filename(name: &str) -> Result<ParsedFilename> {
    let caps = FILENAME_RE
        .captures(name.trim())
        .ok_or_else(|| Error::unrecognized_filename(name))?;

    let dataset = DatasetType::from_name(&caps[1])
        .ok_or_else(|| Error::unrecognized_filename(name))?;

    let exported_at = NaiveDateTime::parse_from_str(&caps[3], TIMESTAMP_FORMAT)
        .map_err(|_| Error::unrecognized_filename(name))?;

    Ok(ParsedFilename {
        dataset,
        opponent: caps[2].trim().to_string(),
        exported_at,
    })
}
