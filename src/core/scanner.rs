//! Eligibility scan over one cutoff grid.
//!
//! A cell qualifies when its historical threshold is at or below the
//! student's score. Qualifying cells in the preferred region become matches;
//! qualifying cells in the alternate allow-list (outside the preferred
//! region) become alternates.

use crate::core::header::parse_header;
use crate::domain::model::{AlternateSelection, Grid, Program, NOT_QUALIFIED};
use crate::utils::error::{FinderError, Result};
use std::cmp::Ordering;

pub const DEFAULT_ALTERNATE_LIMIT: usize = 5;

pub const DEFAULT_ALTERNATE_REGIONS: [&str; 6] =
    ["Colombo", "Gampaha", "Kalutara", "Kandy", "Galle", "Matara"];

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub alternate_regions: Vec<String>,
    pub alternate_limit: usize,
    pub alternate_selection: AlternateSelection,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            alternate_regions: DEFAULT_ALTERNATE_REGIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
            alternate_limit: DEFAULT_ALTERNATE_LIMIT,
            alternate_selection: AlternateSelection::default(),
        }
    }
}

/// Read one cell as a threshold.
///
/// `Ok(None)` for the empty and `NQC` sentinels; `ParseError` for anything
/// that is not a finite number.
pub fn parse_threshold(raw: &str, row: usize, column: usize) -> Result<Option<f64>> {
    let value = raw.trim();
    if value.is_empty() || value == NOT_QUALIFIED {
        return Ok(None);
    }

    match value.parse::<f64>() {
        Ok(threshold) if threshold.is_finite() => Ok(Some(threshold)),
        _ => Err(FinderError::ParseError {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

pub(crate) fn normalize_region(region: &str) -> String {
    region.trim().to_lowercase()
}

pub(crate) fn sort_by_threshold_desc(programs: &mut [Program]) {
    // stable: equal thresholds keep encounter order
    programs.sort_by(|a, b| {
        b.historical_threshold
            .partial_cmp(&a.historical_threshold)
            .unwrap_or(Ordering::Equal)
    });
}

/// Scan `grid` for programs a student with `score` qualifies for.
///
/// Returns `(matches, alternates)`, each sorted by threshold, highest first.
/// Malformed cells are logged and skipped; only an unusable grid fails.
pub fn scan(
    grid: &Grid,
    track: &str,
    score: f64,
    preferred_region: &str,
    options: &ScanOptions,
) -> Result<(Vec<Program>, Vec<Program>)> {
    if !grid.is_usable() {
        return Err(FinderError::data_unavailable(
            track,
            format!("expected a header row and at least one region row, got {} rows", grid.len()),
        ));
    }

    let preferred = normalize_region(preferred_region);
    let allowed: Vec<String> = options
        .alternate_regions
        .iter()
        .map(|r| normalize_region(r))
        .collect();

    let header = grid.header();
    let mut matches = Vec::new();
    let mut qualifying = Vec::new();
    let mut skipped = 0usize;

    for (row_index, row) in grid.data_rows() {
        let region = row.first().map(String::as_str).unwrap_or_default();
        let width = header.len().min(row.len());

        for column in 1..width {
            let threshold = match parse_threshold(&row[column], row_index, column) {
                Ok(Some(threshold)) => threshold,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Skipping cell in track '{}': {}", track, e);
                    skipped += 1;
                    continue;
                }
            };

            if threshold > score {
                continue;
            }

            let (program_name, institution) = parse_header(&header[column]);
            let program = Program::new(
                format!("{}-{}", row_index, column),
                program_name,
                institution,
                track,
                region,
                threshold,
            );

            if normalize_region(region) == preferred {
                matches.push(program.clone());
            }
            qualifying.push(program);
        }
    }

    let candidates = qualifying.into_iter().filter(|p| {
        let region = normalize_region(&p.region);
        region != preferred && allowed.contains(&region)
    });

    let alternates: Vec<Program> = match options.alternate_selection {
        AlternateSelection::TruncateThenSort => {
            let mut picked: Vec<Program> = candidates.take(options.alternate_limit).collect();
            sort_by_threshold_desc(&mut picked);
            picked
        }
        AlternateSelection::SortThenTruncate => {
            let mut all: Vec<Program> = candidates.collect();
            sort_by_threshold_desc(&mut all);
            all.truncate(options.alternate_limit);
            all
        }
    };
    sort_by_threshold_desc(&mut matches);

    tracing::debug!(
        "Scanned track '{}': {} matches, {} alternates, {} malformed cells",
        track,
        matches.len(),
        alternates.len(),
        skipped
    );

    Ok((matches, alternates))
}
