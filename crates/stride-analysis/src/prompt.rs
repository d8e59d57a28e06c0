//! Analysis prompt template and structured-reply parsing
//!
//! Every adapter sends the same prompt and is expected to reply with a
//! single JSON object. Parsing is tolerant of markdown code fences and
//! surrounding prose, since models routinely wrap JSON in both.

use std::fmt::Write;

use stride_core::{AnalysisRequest, AnalysisResult};

use crate::error::AnalysisError;

/// Build the analysis prompt for a progress check-in
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let goal = &request.goal;
    let mut prompt = String::new();

    let _ = writeln!(prompt, "You are a goal coach reviewing a progress check-in.");
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Goal: {} (category: {}, progress: {}%)",
        goal.title, goal.category, goal.progress_percent
    );
    if let Some(date) = goal.target_date {
        let _ = writeln!(prompt, "Target date: {date}");
    }
    if let Some(ref description) = goal.description {
        let _ = writeln!(prompt, "About this goal: {description}");
    }
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Latest check-in:\n{}", request.note);

    if !request.recent_notes.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Recent check-ins, most recent first:");
        for note in &request.recent_notes {
            let _ = writeln!(prompt, "- {note}");
        }
    }

    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Respond with a single JSON object and nothing else: \
         {{\"insight\": \"one or two sentences about this check-in\", \
         \"suggestion\": \"one concrete next step, or null\", \
         \"sentiment\": \"positive\" | \"neutral\" | \"negative\" | \"mixed\"}}"
    );

    prompt
}

/// Parse a model reply into a structured analysis result
///
/// Fails when the reply contains no JSON object or the object lacks
/// required fields.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let json = extract_json_object(text)
        .ok_or_else(|| AnalysisError::MalformedResponse("no JSON object in model output".to_owned()))?;

    serde_json::from_str(json).map_err(|e| AnalysisError::MalformedResponse(format!("invalid analysis payload: {e}")))
}

/// Slice the outermost `{ ... }` span out of model text
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
