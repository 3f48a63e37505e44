use crate::core::header::parse_header;
use crate::core::scanner::parse_threshold;
use crate::domain::model::{Grid, Program};

/// Every program with a recorded threshold in `grid`, no score filter.
///
/// Identifiers are `"{track}-{row}-{column}"` so they stay unique across
/// tracks in one listing.
pub fn catalog_programs(grid: &Grid, track_id: &str) -> Vec<Program> {
    let header = grid.header();
    let mut programs = Vec::new();

    for (row_index, row) in grid.data_rows() {
        let region = row.first().map(String::as_str).unwrap_or_default();

        for column in 1..header.len() {
            let Some(raw) = row.get(column) else {
                break;
            };

            let threshold = match parse_threshold(raw, row_index, column) {
                Ok(Some(threshold)) => threshold,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Skipping catalog cell in track '{}': {}", track_id, e);
                    continue;
                }
            };

            let (program_name, institution) = parse_header(&header[column]);
            programs.push(Program::new(
                format!("{}-{}-{}", track_id, row_index, column),
                program_name,
                institution,
                track_id,
                region,
                threshold,
            ));
        }
    }

    programs
}
