use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use sprout_core::models::answer_set::AnswerSet;
use sprout_instruments::instruments::criteria::{self, CriteriaQuestion, CriteriaResult};
use sprout_instruments::instruments::screener::{self, ScreenerQuestion, ScreenerResult};

use crate::aggregate::{aggregate, CaseAggregate};
use crate::error::CaseError;

const BEHAVIOR_SCREENER: &str = "behavior_screener";
const CRITERIA_CHECKLIST: &str = "criteria_checklist";

/// The answers last submitted for one instrument and the result computed
/// from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntry<A, R> {
    pub answers: A,
    pub result: R,
    pub submitted_at: jiff::Timestamp,
}

pub type ScreenerEntry = StoredEntry<AnswerSet<ScreenerQuestion>, ScreenerResult>;
pub type CriteriaEntry = StoredEntry<AnswerSet<CriteriaQuestion>, CriteriaResult>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    pub screener: Option<ScreenerEntry>,
    pub criteria: Option<CriteriaEntry>,
}

/// Latest screening results per subject.
///
/// Each submission recomputes the result from the submitted answers and
/// replaces the previous entry in one write. Concurrent submissions for the
/// same subject resolve last-write-wins.
#[derive(Debug, Default)]
pub struct CaseRecords {
    subjects: RwLock<HashMap<Uuid, SubjectRecord>>,
}

impl CaseRecords {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, SubjectRecord>>, CaseError> {
        self.subjects.read().map_err(|_| CaseError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, SubjectRecord>>, CaseError> {
        self.subjects.write().map_err(|_| CaseError::Poisoned)
    }

    /// Score and store a screener answer set, replacing any earlier one.
    ///
    /// An answer set with no Yes/No answer is not scored: any earlier entry
    /// is dropped so the case reads "not completed", and
    /// [`CaseError::EmptySubmission`] is returned.
    pub fn submit_screener(
        &self,
        subject_id: Uuid,
        answers: AnswerSet<ScreenerQuestion>,
    ) -> Result<ScreenerResult, CaseError> {
        if answers.is_empty() {
            self.withdraw_screener(subject_id)?;
            return Err(CaseError::EmptySubmission(BEHAVIOR_SCREENER));
        }

        let result = screener::score(&answers);
        let entry = StoredEntry {
            answers,
            result,
            submitted_at: jiff::Timestamp::now(),
        };
        self.write()?.entry(subject_id).or_default().screener = Some(entry);

        info!(
            subject_id = %subject_id,
            instrument = BEHAVIOR_SCREENER,
            total_score = result.total_score,
            risk_tier = ?result.risk_tier,
            "screener result recorded"
        );
        Ok(result)
    }

    /// Evaluate and store a criteria checklist answer set, replacing any
    /// earlier one. Empty answer sets are handled as in
    /// [`CaseRecords::submit_screener`].
    pub fn submit_criteria(
        &self,
        subject_id: Uuid,
        answers: AnswerSet<CriteriaQuestion>,
    ) -> Result<CriteriaResult, CaseError> {
        if answers.is_empty() {
            self.withdraw_criteria(subject_id)?;
            return Err(CaseError::EmptySubmission(CRITERIA_CHECKLIST));
        }

        let result = criteria::evaluate(&answers);
        let entry = StoredEntry {
            answers,
            result: result.clone(),
            submitted_at: jiff::Timestamp::now(),
        };
        self.write()?.entry(subject_id).or_default().criteria = Some(entry);

        info!(
            subject_id = %subject_id,
            instrument = CRITERIA_CHECKLIST,
            domain_a = result.domain_a.groups_met,
            domain_b = result.domain_b.groups_met,
            meets_criteria = result.meets_criteria,
            "criteria result recorded"
        );
        Ok(result)
    }

    /// Submit screener answers in their JSON wire form.
    pub fn submit_screener_json(
        &self,
        subject_id: Uuid,
        json: &str,
    ) -> Result<ScreenerResult, CaseError> {
        self.submit_screener(subject_id, AnswerSet::from_json(json)?)
    }

    /// Submit criteria answers in their JSON wire form.
    pub fn submit_criteria_json(
        &self,
        subject_id: Uuid,
        json: &str,
    ) -> Result<CriteriaResult, CaseError> {
        self.submit_criteria(subject_id, AnswerSet::from_json(json)?)
    }

    /// Drop the screener entry so the case reads "not completed" again.
    /// Returns whether there was one.
    pub fn withdraw_screener(&self, subject_id: Uuid) -> Result<bool, CaseError> {
        let removed = self
            .write()?
            .get_mut(&subject_id)
            .and_then(|r| r.screener.take())
            .is_some();
        info!(subject_id = %subject_id, instrument = BEHAVIOR_SCREENER, removed, "screener withdrawn");
        Ok(removed)
    }

    /// Drop the criteria entry so the case reads "not completed" again.
    /// Returns whether there was one.
    pub fn withdraw_criteria(&self, subject_id: Uuid) -> Result<bool, CaseError> {
        let removed = self
            .write()?
            .get_mut(&subject_id)
            .and_then(|r| r.criteria.take())
            .is_some();
        info!(subject_id = %subject_id, instrument = CRITERIA_CHECKLIST, removed, "criteria withdrawn");
        Ok(removed)
    }

    pub fn screener_entry(&self, subject_id: Uuid) -> Result<Option<ScreenerEntry>, CaseError> {
        Ok(self
            .read()?
            .get(&subject_id)
            .and_then(|r| r.screener.clone()))
    }

    pub fn criteria_entry(&self, subject_id: Uuid) -> Result<Option<CriteriaEntry>, CaseError> {
        Ok(self
            .read()?
            .get(&subject_id)
            .and_then(|r| r.criteria.clone()))
    }

    /// The screener answers last submitted, for re-editing a form.
    pub fn screener_answers(
        &self,
        subject_id: Uuid,
    ) -> Result<Option<AnswerSet<ScreenerQuestion>>, CaseError> {
        Ok(self.screener_entry(subject_id)?.map(|e| e.answers))
    }

    /// The criteria answers last submitted, for re-editing a form.
    pub fn criteria_answers(
        &self,
        subject_id: Uuid,
    ) -> Result<Option<AnswerSet<CriteriaQuestion>>, CaseError> {
        Ok(self.criteria_entry(subject_id)?.map(|e| e.answers))
    }

    /// Build a fresh case view from the current entries. An unknown subject
    /// reads as both instruments not completed.
    pub fn case_aggregate(&self, subject_id: Uuid) -> Result<CaseAggregate, CaseError> {
        let subjects = self.read()?;
        let record = subjects.get(&subject_id);
        Ok(aggregate(
            record.and_then(|r| r.screener.as_ref()).map(|e| e.result),
            record
                .and_then(|r| r.criteria.as_ref())
                .map(|e| e.result.clone()),
        ))
    }

    /// Subjects with at least one stored result.
    pub fn subject_ids(&self) -> Result<Vec<Uuid>, CaseError> {
        Ok(self
            .read()?
            .iter()
            .filter(|(_, r)| r.screener.is_some() || r.criteria.is_some())
            .map(|(id, _)| *id)
            .collect())
    }
}
