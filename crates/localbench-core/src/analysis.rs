//! Result types produced by one competitor analysis.

use serde::{Deserialize, Serialize};

/// One competitor line recovered from the model's data block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub name: String,
    /// Average star rating. Expected within 0–5 but not enforced; 0 when the
    /// model reported none or it could not be parsed.
    pub rating: f64,
    /// Number of reviews behind the rating, 0 when unknown.
    pub reviews: u64,
}

/// Citation returned by the model invocation alongside its text.
///
/// Passed through untouched: URIs are neither validated nor fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroundingReference {
    Web {
        uri: String,
        title: String,
    },
    Map {
        uri: String,
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        place_id: Option<String>,
    },
}

impl GroundingReference {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Web { uri, .. } | Self::Map { uri, .. } => uri,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Web { title, .. } | Self::Map { title, .. } => title,
        }
    }

    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }
}

/// Colour band used when charting a competitor's rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// 4.5 and above.
    Top,
    /// 4.0 up to 4.5.
    Strong,
    Average,
}

impl RatingBand {
    #[must_use]
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 4.5 {
            Self::Top
        } else if rating >= 4.0 {
            Self::Strong
        } else {
            Self::Average
        }
    }
}

/// Everything one analysis hands back to the caller.
///
/// Built once by [`crate::extract_outcome`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    narrative: String,
    competitors: Vec<CompetitorRecord>,
    grounding: Vec<GroundingReference>,
}

impl AnalysisOutcome {
    pub(crate) fn new(
        narrative: String,
        competitors: Vec<CompetitorRecord>,
        grounding: Vec<GroundingReference>,
    ) -> Self {
        Self {
            narrative,
            competitors,
            grounding,
        }
    }

    /// Reply text with the data block removed.
    #[must_use]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Competitors in the order the model listed them.
    #[must_use]
    pub fn competitors(&self) -> &[CompetitorRecord] {
        &self.competitors
    }

    #[must_use]
    pub fn grounding(&self) -> &[GroundingReference] {
        &self.grounding
    }

    /// Map references with a usable URI, for the "places found" list.
    pub fn map_references(&self) -> impl Iterator<Item = &GroundingReference> {
        self.grounding
            .iter()
            .filter(|r| r.is_map() && !r.uri().is_empty())
    }

    /// Competitors worth charting: rated above zero, best rating first.
    ///
    /// Ties keep the order the model listed them in.
    #[must_use]
    pub fn charted_competitors(&self) -> Vec<&CompetitorRecord> {
        let mut rated: Vec<&CompetitorRecord> =
            self.competitors.iter().filter(|c| c.rating > 0.0).collect();
        rated.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        rated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rating: f64, reviews: u64) -> CompetitorRecord {
        CompetitorRecord {
            name: name.to_string(),
            rating,
            reviews,
        }
    }

    #[test]
    fn rating_band_thresholds() {
        assert_eq!(RatingBand::for_rating(4.9), RatingBand::Top);
        assert_eq!(RatingBand::for_rating(4.5), RatingBand::Top);
        assert_eq!(RatingBand::for_rating(4.49), RatingBand::Strong);
        assert_eq!(RatingBand::for_rating(4.0), RatingBand::Strong);
        assert_eq!(RatingBand::for_rating(3.99), RatingBand::Average);
    }

    #[test]
    fn charted_competitors_drop_unrated_and_sort_descending() {
        let outcome = AnalysisOutcome::new(
            String::new(),
            vec![
                record("Low", 3.2, 10),
                record("Unknown", 0.0, 0),
                record("High", 4.8, 200),
                record("Tie", 3.2, 5),
            ],
            vec![],
        );

        let names: Vec<&str> = outcome
            .charted_competitors()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["High", "Low", "Tie"]);
        assert_eq!(outcome.competitors().len(), 4);
    }

    #[test]
    fn map_references_skip_web_and_blank_uris() {
        let outcome = AnalysisOutcome::new(
            String::new(),
            vec![],
            vec![
                GroundingReference::Web {
                    uri: "https://example.com".to_string(),
                    title: "Example".to_string(),
                },
                GroundingReference::Map {
                    uri: "https://maps.google.com/?cid=1".to_string(),
                    title: "Bakery One".to_string(),
                    place_id: Some("places/abc".to_string()),
                },
                GroundingReference::Map {
                    uri: String::new(),
                    title: "No link".to_string(),
                    place_id: None,
                },
            ],
        );

        let titles: Vec<&str> = outcome.map_references().map(GroundingReference::title).collect();
        assert_eq!(titles, vec!["Bakery One"]);
    }

    #[test]
    fn grounding_reference_serializes_with_kind_tag() {
        let reference = GroundingReference::Map {
            uri: "https://maps.google.com/?cid=1".to_string(),
            title: "Bakery One".to_string(),
            place_id: None,
        };
        let json = serde_json::to_value(&reference).expect("serialize");
        assert_eq!(json["kind"], "map");
        assert_eq!(json["title"], "Bakery One");
        assert!(json.get("place_id").is_none());
    }
}
