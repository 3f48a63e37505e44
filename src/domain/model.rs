use serde::{Deserialize, Serialize};

/// Index of the header row in every cutoff grid.
pub const HEADER_ROW: usize = 0;

/// Cell marker meaning no qualified candidates for that program in that region.
pub const NOT_QUALIFIED: &str = "NQC";

/// Institution used when a header carries no trailing parenthesized group.
pub const UNKNOWN_INSTITUTION: &str = "Unknown";

/// A 2-D block of string cells for one subject track.
///
/// Row [`HEADER_ROW`] holds program headers; every other row is a region row
/// whose column 0 is the region label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A grid needs a header row and at least one region row to be worth scanning.
    pub fn is_usable(&self) -> bool {
        self.rows.len() >= 2
    }

    pub fn header(&self) -> &[String] {
        self.rows
            .get(HEADER_ROW)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Region rows paired with their absolute row index.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != HEADER_ROW)
            .map(|(index, row)| (index, row.as_slice()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    #[serde(rename = "degreeName")]
    pub program_name: String,
    #[serde(rename = "university")]
    pub institution: String,
    #[serde(rename = "subjectStream")]
    pub track: String,
    #[serde(rename = "district")]
    pub region: String,
    #[serde(rename = "previousCutoff")]
    pub historical_threshold: f64,
    pub description: String,
    pub subject_streams: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Program {
    pub fn new(
        id: String,
        program_name: String,
        institution: String,
        track: &str,
        region: &str,
        historical_threshold: f64,
    ) -> Self {
        let description = format!("{} at {}", program_name, institution);
        Self {
            id,
            program_name,
            institution,
            track: track.to_string(),
            region: region.to_string(),
            historical_threshold,
            description,
            subject_streams: vec![track.to_string()],
            kind: "undergraduate".to_string(),
        }
    }
}

/// What a student submits: a track label, a score, and a preferred region.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub track: String,
    pub score: f64,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(rename = "recommendations")]
    pub matches: Vec<Program>,
    #[serde(rename = "nearbyRecommendations")]
    pub alternates: Vec<Program>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
}

impl RecommendationSet {
    pub fn new(matches: Vec<Program>, alternates: Vec<Program>) -> Self {
        let total_count = matches.len() + alternates.len();
        Self {
            matches,
            alternates,
            total_count,
        }
    }
}

/// How the alternate list is capped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternateSelection {
    /// Keep the first N in encounter order, then sort them.
    #[default]
    TruncateThenSort,
    /// Sort every candidate, then keep the best N.
    SortThenTruncate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_usable_needs_two_rows() {
        assert!(!Grid::default().is_usable());
        assert!(!Grid::from_rows([["Region", "A (X)"]]).is_usable());
        assert!(Grid::from_rows([["Region", "A (X)"], ["Colombo", "1.2"]]).is_usable());
    }

    #[test]
    fn test_grid_data_rows_skip_header() {
        let grid = Grid::from_rows([["Region", "A"], ["Colombo", "1"], ["Kandy", "2"]]);
        let indices: Vec<usize> = grid.data_rows().map(|(i, _)| i).collect();

        assert_eq!(grid.header(), ["Region", "A"]);
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn test_program_wire_format() {
        let program = Program::new(
            "1-2".to_string(),
            "Physics".to_string(),
            "University of Colombo".to_string(),
            "Mathematics",
            "Colombo",
            1.25,
        );

        let json = serde_json::to_value(&program).unwrap();
        assert_eq!(json["degreeName"], "Physics");
        assert_eq!(json["university"], "University of Colombo");
        assert_eq!(json["district"], "Colombo");
        assert_eq!(json["previousCutoff"], 1.25);
        assert_eq!(json["subjectStream"], "Mathematics");
        assert_eq!(json["subjectStreams"], serde_json::json!(["Mathematics"]));
        assert_eq!(json["description"], "Physics at University of Colombo");
        assert_eq!(json["type"], "undergraduate");
    }

    #[test]
    fn test_recommendation_set_counts_both_lists() {
        let program = Program::new(
            "1-1".to_string(),
            "A".to_string(),
            "X".to_string(),
            "Maths",
            "Kandy",
            1.0,
        );
        let set = RecommendationSet::new(vec![program.clone()], vec![program.clone(), program]);

        assert_eq!(set.total_count, 3);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["nearbyRecommendations"].as_array().unwrap().len(), 2);
    }
}
