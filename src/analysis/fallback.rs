//! Deterministic synthetic answers used when Gemini is unreachable or
//! its output cannot be recovered.
//!
//! The autopsy fallback interpolates the caller's failure score across
//! twelve quarterly events spanning 36 months, so the same score and
//! metrics always produce the same timeline for a given anchor month.

use chrono::{Datelike, Months, NaiveDate};

use super::types::{
    AutopsyReport, EventType, MetricsInfo, Priority, RecoveryAction, TimelineEvent, TriggerEvent,
};

const TOTAL_EVENTS: usize = 12;
const ROOT_INDEX: usize = 7;

/// Synthesize a full autopsy report from a failure score and metrics.
///
/// `anchor` is the date the timeline counts back from (the current
/// date in production; fixed in tests).
pub fn fallback_autopsy(failure_score: i64, metrics: &MetricsInfo, anchor: NaiveDate) -> AutopsyReport {
    let month_start =
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor);
    let start = month_start
        .checked_sub_months(Months::new(33))
        .unwrap_or(month_start);

    let base = (failure_score - 25).max(10);
    let step = (failure_score - base) as f64 / (TOTAL_EVENTS - 1) as f64;

    let burn_ratio = metrics.burn_rate_ratio.unwrap_or(1.0);
    let cash_days = metrics.cash_days.unwrap_or(60.0);
    let churn = metrics
        .churn_rate
        .map(|c| c.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let burn_impact = format!("+{}%", (burn_ratio * 10.0).round() as i64);

    let timeline: Vec<TimelineEvent> = (0..TOTAL_EVENTS)
        .map(|i| {
            let date = start
                .checked_add_months(Months::new((i * 3) as u32))
                .unwrap_or(start)
                .format("%Y-%m")
                .to_string();
            let score = (base as f64 + step * i as f64).round() as i64;
            let phase = if i < 4 {
                "Year 1 - Healthy Growth"
            } else if i < 8 {
                "Year 2 - Hidden Decline"
            } else {
                "Year 3 - Visible Collapse"
            };
            let is_root = i == ROOT_INDEX;
            let event_type = if is_root {
                EventType::RootCause
            } else if i < ROOT_INDEX - 1 {
                EventType::Normal
            } else if score < 65 {
                EventType::Warning
            } else {
                EventType::Critical
            };

            TimelineEvent {
                date,
                event_type,
                label: if is_root {
                    "Root cause decision made".to_string()
                } else {
                    "Operational signals worsen".to_string()
                },
                score,
                description: if is_root {
                    "A single decision compounded burn and weakened margins.".to_string()
                } else {
                    "Cash pressure rises as growth weakens and costs climb.".to_string()
                },
                root_cause: is_root,
                phase: phase.to_string(),
                burn_impact: is_root.then(|| burn_impact.clone()),
            }
        })
        .collect();

    let trigger_event = TriggerEvent {
        date: timeline[ROOT_INDEX].date.clone(),
        description: "Root cause decision compounded burn and margins.".to_string(),
        burn_impact,
        cash_impact: format!("-{} days runway", ((cash_days * 0.5) as i64).max(10)),
        months_before_collapse: ((TOTAL_EVENTS - 1 - ROOT_INDEX) * 3) as i64,
    };

    let narrative = format!(
        "Failure score is {failure_score}/100 with rising burn and slowing growth. \
         Burn rate now sits around {burn_ratio}x revenue and churn is {churn}%. \
         Cash runway is approximately {cash_days} days, leaving limited time to recover."
    );

    AutopsyReport {
        narrative,
        trigger_event,
        timeline,
    }
}

/// Canned recovery plan for the `/api/recovery-plan` endpoint.
pub fn fallback_recovery_actions() -> Vec<RecoveryAction> {
    vec![
        action(Priority::High, "Freeze non-essential spending", "Cuts burn within days and preserves runway.", 12),
        action(Priority::High, "Pause discounts and promos", "Protects margin and stabilizes cash flow.", 10),
        action(Priority::High, "Delay new hires and backfill only", "Reduces fixed costs while keeping core ops stable.", 8),
        action(Priority::Medium, "Target churned customers to return", "Recovers lost revenue with low acquisition cost.", 6),
        action(Priority::Low, "Renegotiate supplier payment terms", "Extends runway by spreading cash outflows.", 4),
    ]
}

/// Canned recovery plan for the legacy `/recovery-plan` endpoint.
/// Texts differ from the modern fallback and are kept for clients that
/// string-match on them.
pub fn legacy_fallback_recovery_actions() -> Vec<RecoveryAction> {
    vec![
        action(Priority::High, "Freeze all non-essential spending immediately", "Reduces burn rate by an estimated 15-20% within 7 days.", 12),
        action(Priority::High, "End discount campaign this week", "Restores per-order margin from current depressed levels.", 10),
        action(Priority::High, "Review new hire necessity and pause recruitment", "Saves ₹72,000/month in fixed payroll costs.", 8),
        action(Priority::Medium, "Launch customer win-back outreach campaign", "Targets recently churned customers to recover 20-30%.", 6),
        action(Priority::Low, "Renegotiate supplier payment terms to net-60", "Extends effective cash runway by 15-20 days.", 4),
    ]
}

fn action(priority: Priority, action: &str, impact: &str, score_improvement: i64) -> RecoveryAction {
    RecoveryAction {
        priority,
        action: action.to_string(),
        impact: impact.to_string(),
        score_improvement,
    }
}
