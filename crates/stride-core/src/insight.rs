use serde::{Deserialize, Serialize};

/// Sentiment classification of a progress note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Note reflects progress or optimism
    Positive,
    /// Note is neither clearly positive nor negative
    Neutral,
    /// Note reflects setbacks or frustration
    Negative,
    /// Note contains both positive and negative signals
    Mixed,
}

/// Output of one successful provider analysis call
///
/// Persisted immediately by the orchestrator and then discarded; no
/// aggregate of results survives an orchestration round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Short insight about the note
    pub insight: String,
    /// Optional actionable suggestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Sentiment classification
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_serializes_lowercase() {
        let json = serde_json::to_string(&Sentiment::Mixed).unwrap();
        assert_eq!(json, "\"mixed\"");
    }

    #[test]
    fn result_requires_insight_and_sentiment() {
        let err = serde_json::from_str::<AnalysisResult>("{\"suggestion\": \"rest more\"}");
        assert!(err.is_err());
    }

    #[test]
    fn suggestion_is_optional() {
        let result: AnalysisResult =
            serde_json::from_str("{\"insight\": \"steady progress\", \"sentiment\": \"positive\"}").unwrap();
        assert!(result.suggestion.is_none());
        assert_eq!(result.sentiment, Sentiment::Positive);
    }
}
