/// The semantic outcome of matching one X row (spec §4.F, §8 invariant 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum MatchStatus {
    Unmatched,
    Matched,
    Ambiguous,
    Review,
    Duplicate,
}

/// Configurable display labels for each [`MatchStatus`] (spec §4.F
/// `MATCH_STATUS`). Defaults mirror the reference implementation's literal
/// label strings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StatusLabels {
    unmatched: String,
    matched: String,
    ambiguous: String,
    review: String,
    duplicate: String,
}

impl StatusLabels {
    pub fn label(&self, status: MatchStatus) -> &str {
        match status {
            MatchStatus::Unmatched => &self.unmatched,
            MatchStatus::Matched => &self.matched,
            MatchStatus::Ambiguous => &self.ambiguous,
            MatchStatus::Review => &self.review,
            MatchStatus::Duplicate => &self.duplicate,
        }
    }
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            unmatched: "UNMATCHED".to_string(),
            matched: "MATCHED".to_string(),
            ambiguous: "AMBIGUOUS".to_string(),
            review: "REVIEW".to_string(),
            duplicate: "DUPLICATE".to_string(),
        }
    }
}
