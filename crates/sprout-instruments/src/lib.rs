//! sprout-instruments
//!
//! Screening instrument definitions and scoring. Pure functions over answer
//! sets; no storage dependency. Defines the question catalogue of each
//! instrument and the rules that turn answers into results.

pub mod error;
pub mod instruments;
pub mod schema;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sprout_core::models::answer::Answer;
use sprout_core::models::answer_set::RawAnswers;

use error::InstrumentError;
use instruments::criteria::{CriteriaDomain, CriteriaResult};
use instruments::screener::ScreenerResult;
use schema::{Domain, ValidationError, ValidationKind};

/// Result of scoring any registered instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "instrument", content = "result", rename_all = "snake_case")]
#[ts(export)]
pub enum InstrumentResult {
    Screener(ScreenerResult),
    Criteria(CriteriaResult),
}

impl InstrumentResult {
    /// One-line summary for a case view.
    pub fn summary(&self) -> String {
        match self {
            InstrumentResult::Screener(r) => format!(
                "Total score {}/{} ({}), {} items answered",
                r.total_score,
                ScreenerResult::max_score(),
                r.risk_tier.label(),
                r.answered_count,
            ),
            InstrumentResult::Criteria(r) => {
                let domains: Vec<String> = [CriteriaDomain::A, CriteriaDomain::B]
                    .iter()
                    .map(|d| {
                        let totals = r.domain(*d);
                        format!("{d:?}: {}/{} groups", totals.groups_met, totals.group_count)
                    })
                    .collect();
                format!(
                    "{} ({}, onset: {}, impairment: {})",
                    r.interpretation(),
                    domains.join(", "),
                    yes_no(r.early_onset),
                    yes_no(r.clinical_impairment),
                )
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "behavior_screener").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// The domains and question groups this instrument asks.
    fn domains(&self) -> &[Domain];

    /// Score a loose form payload. Never fails; unknown ids and malformed
    /// values are simply not counted.
    fn score_raw(&self, raw: &RawAnswers) -> InstrumentResult;

    /// Report ids this instrument does not know and values outside the
    /// Yes/No vocabulary.
    fn validate_answers(&self, raw: &RawAnswers) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (id, value) in raw {
            let known = self
                .domains()
                .iter()
                .flat_map(|d| d.questions())
                .any(|q| &q.id == id);

            if !known {
                errors.push(ValidationError {
                    question_id: id.clone(),
                    value: value.clone(),
                    kind: ValidationKind::UnknownQuestion,
                    message: format!("{}: unknown question '{id}'", self.name()),
                });
                continue;
            }

            if let Some(v) = value
                && !v.is_empty()
                && !Answer::parse(Some(v.as_str())).is_answered()
            {
                errors.push(ValidationError {
                    question_id: id.clone(),
                    value: value.clone(),
                    kind: ValidationKind::UnrecognizedValue,
                    message: format!(
                        "{}: answer '{v}' to '{id}' is not Yes or No",
                        self.name()
                    ),
                });
            }
        }
        errors
    }

    /// Fail on the first validation finding.
    fn check_answers(&self, raw: &RawAnswers) -> Result<(), InstrumentError> {
        match self.validate_answers(raw).into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Format answers and the computed result as structured text for a
    /// case report.
    fn to_structured_input(&self, raw: &RawAnswers) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for domain in self.domains() {
            output.push_str(&format!("### {}\n", domain.name));
            for question in domain.questions() {
                let answer = Answer::parse(raw.get(&question.id).and_then(|v| v.as_deref()));
                output.push_str(&format!("- {}: {}\n", question.text, answer));
            }
            output.push('\n');
        }
        output.push_str(&format!("Result: {}\n", self.score_raw(raw).summary()));
        output
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::screener::BehaviorScreener),
        Box::new(instruments::criteria::CriteriaChecklist),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, failing on unknown ids.
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}
