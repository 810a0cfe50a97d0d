//! Defensive parsing of Gemini output.
//!
//! The model is instructed to return bare JSON, but in practice the
//! text arrives wrapped in markdown code fences, preceded by prose,
//! or both. Recovery is best-effort: strip fences, then look for the
//! outermost brace/bracket span and parse that.

use serde::Deserialize;

use super::types::{AutopsyReport, RecoveryAction, TimelineEvent, TriggerEvent};
use super::AnalysisError;

/// Remove markdown code fences from model output.
///
/// Only kicks in when the trimmed text starts with a fence; every
/// fence line is dropped and the remainder re-joined, so both
/// ` ```json ` and bare ` ``` ` markers disappear.
pub fn strip_code_fences(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text.trim_start().starts_with("```") {
        let kept: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim_start().starts_with("```"))
            .collect();
        return kept.join("\n").trim().to_string();
    }
    text.trim().to_string()
}

/// Recover a JSON value from text that may contain surrounding prose.
///
/// Tries the whole text first. On failure, takes the span from the
/// first `{` or `[` to the last `}` or `]` and retries.
pub fn recover_json(text: &str) -> Result<serde_json::Value, AnalysisError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }
    if text.is_empty() {
        return Err(AnalysisError::MalformedResponse("empty response".into()));
    }

    let start = [text.find('{'), text.find('[')]
        .into_iter()
        .flatten()
        .min();
    let end = [text.rfind('}'), text.rfind(']')]
        .into_iter()
        .flatten()
        .max();

    match (start, end) {
        (Some(s), Some(e)) if s < e => serde_json::from_str(&text[s..=e])
            .map_err(|err| AnalysisError::JsonParsing(err.to_string())),
        _ => Err(AnalysisError::MalformedResponse(
            "no JSON object or array found".into(),
        )),
    }
}

/// Parse raw autopsy output into a typed report.
///
/// Requires a JSON object with a non-empty `narrative`, a usable
/// `timeline` array and a `triggerEvent` object. Anything less routes
/// the caller to the deterministic fallback.
pub fn parse_autopsy_response(raw: &str) -> Result<AutopsyReport, AnalysisError> {
    let text = strip_code_fences(raw);
    let value = recover_json(&text)?;

    let obj = value
        .as_object()
        .ok_or_else(|| AnalysisError::MalformedResponse("autopsy response is not an object".into()))?;

    let narrative = obj
        .get("narrative")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AnalysisError::MissingField("narrative"))?
        .to_string();

    let trigger_event: TriggerEvent = obj
        .get("triggerEvent")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .ok_or_else(|| AnalysisError::MissingField("triggerEvent"))?;

    let timeline: Vec<TimelineEvent> = match obj.get("timeline") {
        Some(serde_json::Value::Array(items)) => parse_array_lenient(items),
        _ => return Err(AnalysisError::MissingField("timeline")),
    };
    if timeline.is_empty() {
        return Err(AnalysisError::MissingField("timeline"));
    }

    Ok(AutopsyReport {
        narrative,
        trigger_event,
        timeline,
    })
}

/// Parse raw recovery-plan output into a list of actions.
///
/// The model must return a JSON array; entries that fail to
/// deserialize are skipped, and an empty surviving list counts as a
/// parse failure.
pub fn parse_recovery_response(raw: &str) -> Result<Vec<RecoveryAction>, AnalysisError> {
    let text = strip_code_fences(raw);
    let value = recover_json(&text)?;

    let items = value.as_array().ok_or_else(|| {
        AnalysisError::MalformedResponse("recovery response is not an array".into())
    })?;

    let actions: Vec<RecoveryAction> = parse_array_lenient(items);
    if actions.is_empty() {
        return Err(AnalysisError::MalformedResponse(
            "no usable recovery actions".into(),
        ));
    }
    Ok(actions)
}

/// Parse an array leniently — skip items that fail to deserialize.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(items: &[serde_json::Value]) -> Vec<T> {
    items
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{EventType, Priority};

    const AUTOPSY_JSON: &str = r#"{
        "narrative": "Burn outpaced revenue for three consecutive quarters.",
        "triggerEvent": {
            "date": "2024-03",
            "description": "Opened a second location on borrowed capital.",
            "burnImpact": "+25% burn",
            "cashImpact": "-60 days runway",
            "monthsBeforeCollapse": 12
        },
        "timeline": [
            {
                "date": "2023-01",
                "type": "normal",
                "label": "Steady growth",
                "score": 32,
                "description": "Revenue tracking plan.",
                "rootCause": false,
                "phase": "Year 1 - Healthy Growth"
            },
            {
                "date": "2024-03",
                "type": "root_cause",
                "label": "Expansion decision",
                "score": 55,
                "description": "Second location doubled fixed costs.",
                "rootCause": true,
                "phase": "Year 2 - Hidden Decline",
                "burnImpact": "+25%"
            }
        ]
    }"#;

    #[test]
    fn strip_fences_removes_fence_lines() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn strip_fences_leaves_plain_text_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn strip_fences_empty_input() {
        assert_eq!(strip_code_fences(""), "");
    }

    #[test]
    fn strip_fences_handles_inner_fences() {
        let fenced = "```json\n[1, 2]\n```\ntrailing notes\n```";
        let stripped = strip_code_fences(fenced);
        assert!(stripped.contains("[1, 2]"));
        assert!(!stripped.contains("```"));
    }

    #[test]
    fn recover_json_direct_parse() {
        let value = recover_json(r#"{"key": "value"}"#).unwrap();
        assert_eq!(value["key"], "value");
    }

    #[test]
    fn recover_json_embedded_in_prose() {
        let text = r#"Sure! Here is the analysis you asked for: {"score": 70} Hope that helps."#;
        let value = recover_json(text).unwrap();
        assert_eq!(value["score"], 70);
    }

    #[test]
    fn recover_json_array_with_commentary() {
        let text = "The plan:\n[{\"priority\": \"HIGH\"}]\nLet me know if you need more.";
        let value = recover_json(text).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn recover_json_rejects_plain_prose() {
        let err = recover_json("No structured data here at all.");
        assert!(matches!(err, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn recover_json_rejects_empty() {
        let err = recover_json("");
        assert!(matches!(err, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn recover_json_invalid_span_is_error() {
        let err = recover_json("prose { still not json } more prose");
        assert!(matches!(err, Err(AnalysisError::JsonParsing(_))));
    }

    #[test]
    fn parse_autopsy_full_response() {
        let report = parse_autopsy_response(AUTOPSY_JSON).unwrap();
        assert!(report.narrative.contains("Burn outpaced"));
        assert_eq!(report.trigger_event.date, "2024-03");
        assert_eq!(report.trigger_event.months_before_collapse, 12);
        assert_eq!(report.timeline.len(), 2);
        assert_eq!(report.timeline[1].event_type, EventType::RootCause);
        assert!(report.timeline[1].root_cause);
    }

    #[test]
    fn parse_autopsy_fenced_with_prose() {
        let wrapped = format!("Here is your JSON:\n```json\n{AUTOPSY_JSON}\n```");
        let report = parse_autopsy_response(&wrapped).unwrap();
        assert_eq!(report.timeline.len(), 2);
    }

    #[test]
    fn parse_autopsy_missing_narrative_is_error() {
        let raw = r#"{"timeline": [], "triggerEvent": {}}"#;
        let err = parse_autopsy_response(raw);
        assert!(matches!(err, Err(AnalysisError::MissingField("narrative"))));
    }

    #[test]
    fn parse_autopsy_bad_timeline_entries_skipped() {
        let raw = r#"{
            "narrative": "ok",
            "triggerEvent": {
                "date": "2024-03", "description": "d",
                "burnImpact": "+10%", "cashImpact": "-30 days runway",
                "monthsBeforeCollapse": 9
            },
            "timeline": [
                {"unexpected": true},
                {
                    "date": "2024-01", "type": "warning", "label": "l",
                    "score": 60, "description": "d", "rootCause": false,
                    "phase": "Year 3 - Visible Collapse"
                }
            ]
        }"#;
        let report = parse_autopsy_response(raw).unwrap();
        assert_eq!(report.timeline.len(), 1);
        assert_eq!(report.timeline[0].event_type, EventType::Warning);
    }

    #[test]
    fn parse_autopsy_all_timeline_entries_bad_is_error() {
        let raw = r#"{
            "narrative": "ok",
            "triggerEvent": {
                "date": "2024-03", "description": "d",
                "burnImpact": "+10%", "cashImpact": "-30 days runway",
                "monthsBeforeCollapse": 9
            },
            "timeline": [{"junk": 1}, {"junk": 2}]
        }"#;
        let err = parse_autopsy_response(raw);
        assert!(matches!(err, Err(AnalysisError::MissingField("timeline"))));
    }

    #[test]
    fn parse_autopsy_non_object_is_error() {
        let err = parse_autopsy_response("[1, 2, 3]");
        assert!(matches!(err, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn parse_recovery_valid_array() {
        let raw = r#"[
            {"priority": "HIGH", "action": "Cut spend", "impact": "Less burn.", "scoreImprovement": 12},
            {"priority": "LOW", "action": "Renegotiate terms", "impact": "More runway.", "scoreImprovement": 4}
        ]"#;
        let actions = parse_recovery_response(raw).unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].priority, Priority::High);
        assert_eq!(actions[1].score_improvement, 4);
    }

    #[test]
    fn parse_recovery_skips_invalid_entries() {
        let raw = r#"[
            {"priority": "SOMETIMES", "action": "x", "impact": "y", "scoreImprovement": 5},
            {"priority": "MEDIUM", "action": "Win back churned customers", "impact": "Recovers revenue.", "scoreImprovement": 6}
        ]"#;
        let actions = parse_recovery_response(raw).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].priority, Priority::Medium);
    }

    #[test]
    fn parse_recovery_object_is_error() {
        let err = parse_recovery_response(r#"{"actions": []}"#);
        assert!(matches!(err, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn parse_recovery_all_invalid_is_error() {
        let err = parse_recovery_response(r#"[{"junk": 1}]"#);
        assert!(matches!(err, Err(AnalysisError::MalformedResponse(_))));
    }

    #[test]
    fn parse_recovery_fenced_array() {
        let raw = "```json\n[{\"priority\": \"HIGH\", \"action\": \"a\", \"impact\": \"i\", \"scoreImprovement\": 8}]\n```";
        let actions = parse_recovery_response(raw).unwrap();
        assert_eq!(actions.len(), 1);
    }
}
