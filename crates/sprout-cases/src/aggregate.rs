use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sprout_instruments::instruments::criteria::CriteriaResult;
use sprout_instruments::instruments::screener::ScreenerResult;
use sprout_instruments::InstrumentResult;

/// Either a result or an explicit marker that the instrument was never
/// administered. A report must never render `NotCompleted` as a zero score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
#[ts(export)]
pub enum Completion<T> {
    NotCompleted,
    Completed(T),
}

impl<T> Completion<T> {
    pub fn as_completed(&self) -> Option<&T> {
        match self {
            Completion::Completed(result) => Some(result),
            Completion::NotCompleted => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Completion::Completed(_))
    }
}

impl<T> From<Option<T>> for Completion<T> {
    fn from(result: Option<T>) -> Self {
        match result {
            Some(result) => Completion::Completed(result),
            None => Completion::NotCompleted,
        }
    }
}

/// Read-only view of one subject's screening results.
///
/// Holds exactly what it was built from. It is rebuilt for every read and
/// never recomputes a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseAggregate {
    pub screener: Completion<ScreenerResult>,
    pub criteria: Completion<CriteriaResult>,
}

/// Combine the latest results, substituting `NotCompleted` for a missing one.
pub fn aggregate(
    screener: Option<ScreenerResult>,
    criteria: Option<CriteriaResult>,
) -> CaseAggregate {
    CaseAggregate {
        screener: screener.into(),
        criteria: criteria.into(),
    }
}

impl CaseAggregate {
    /// Both instruments have a result.
    pub fn is_complete(&self) -> bool {
        self.screener.is_completed() && self.criteria.is_completed()
    }

    /// Format the case as structured text for a report.
    pub fn to_structured_input(&self) -> String {
        let mut output = String::from("## Screening Summary\n\n");
        output.push_str(&section(
            "Behavioral Screener",
            self.screener
                .as_completed()
                .map(|r| InstrumentResult::Screener(*r)),
        ));
        output.push_str(&section(
            "Diagnostic Criteria Checklist",
            self.criteria
                .as_completed()
                .map(|r| InstrumentResult::Criteria(r.clone())),
        ));
        output
    }
}

fn section(name: &str, result: Option<InstrumentResult>) -> String {
    match result {
        Some(result) => format!("### {name}\n{}\n\n", result.summary()),
        None => format!("### {name}\nNot completed\n\n"),
    }
}
