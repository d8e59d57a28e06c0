use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Maximum number of historical notes carried by a request
pub const MAX_RECENT_NOTES: usize = 5;

/// Goal context attached to an analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalContext {
    /// Goal title
    pub title: String,
    /// Goal category (e.g. "fitness", "career")
    pub category: String,
    /// Current progress, 0-100
    pub progress_percent: u8,
    /// Optional target completion date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<Date>,
    /// Optional free-text goal description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Input to one orchestration round
///
/// Constructed by the caller and consumed read-only by every concurrent
/// provider call; the orchestrator shares it behind an `Arc` without copying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The progress note being analyzed
    pub note: String,
    /// Context of the goal the note belongs to
    pub goal: GoalContext,
    /// Recent historical notes, most recent first, capped at
    /// [`MAX_RECENT_NOTES`]
    pub recent_notes: Vec<String>,
}

impl AnalysisRequest {
    /// Create a request, truncating `recent_notes` to the bounded window
    pub fn new(note: String, goal: GoalContext, mut recent_notes: Vec<String>) -> Self {
        recent_notes.truncate(MAX_RECENT_NOTES);
        Self {
            note,
            goal,
            recent_notes,
        }
    }
}
