use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::answer::{Answer, QuestionKey};
use crate::error::CoreError;

/// The untyped shape answers arrive in from a form: question id to an
/// optional string value.
pub type RawAnswers = BTreeMap<String, Option<String>>;

/// Answers to one instrument, keyed by that instrument's question enum.
///
/// Only answered items are stored, so a missing key always means
/// "not yet answered".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet<Q: QuestionKey> {
    answers: BTreeMap<Q, Answer>,
}

impl<Q: QuestionKey> Default for AnswerSet<Q> {
    fn default() -> Self {
        Self {
            answers: BTreeMap::new(),
        }
    }
}

impl<Q: QuestionKey> AnswerSet<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`AnswerSet::set`].
    pub fn with(mut self, question: Q, answer: Answer) -> Self {
        self.set(question, answer);
        self
    }

    /// Record an answer. Setting `Unanswered` clears the item.
    pub fn set(&mut self, question: Q, answer: Answer) {
        if answer.is_answered() {
            self.answers.insert(question, answer);
        } else {
            self.answers.remove(&question);
        }
    }

    /// Record an answer by wire id, rejecting ids this instrument does not
    /// know.
    pub fn set_by_id(&mut self, id: &str, answer: Answer) -> Result<(), CoreError> {
        let question = Q::from_id(id).ok_or_else(|| CoreError::UnknownQuestion(id.to_string()))?;
        self.set(question, answer);
        Ok(())
    }

    pub fn clear(&mut self, question: Q) {
        self.answers.remove(&question);
    }

    pub fn get(&self, question: Q) -> Answer {
        self.answers
            .get(&question)
            .copied()
            .unwrap_or(Answer::Unanswered)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of items whose answer is exactly `answer`.
    pub fn count(&self, answer: Answer) -> usize {
        if !answer.is_answered() {
            return Q::ALL.len() - self.answers.len();
        }
        self.answers.values().filter(|a| **a == answer).count()
    }

    /// Number of the given items answered exactly `answer`.
    pub fn count_among(&self, questions: &[Q], answer: Answer) -> usize {
        questions.iter().filter(|q| self.get(**q) == answer).count()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answered items in question order.
    pub fn iter(&self) -> impl Iterator<Item = (Q, Answer)> + '_ {
        self.answers.iter().map(|(q, a)| (*q, *a))
    }

    /// Build from a loose form payload. Unknown ids are dropped and values
    /// other than `"Yes"`/`"No"` count as unanswered.
    pub fn from_raw(raw: &RawAnswers) -> Self {
        let mut set = Self::new();
        for (id, value) in raw {
            match Q::from_id(id) {
                Some(question) => set.set(question, Answer::parse(value.as_deref())),
                None => debug!(question_id = %id, "ignoring unknown question id"),
            }
        }
        set
    }

    pub fn to_raw(&self) -> RawAnswers {
        self.iter()
            .filter_map(|(q, a)| a.as_str().map(|v| (q.id().to_string(), Some(v.to_string()))))
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: RawAnswers = serde_json::from_str(json)?;
        Ok(Self::from_raw(&raw))
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }
}

impl<Q: QuestionKey> FromIterator<(Q, Answer)> for AnswerSet<Q> {
    fn from_iter<I: IntoIterator<Item = (Q, Answer)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (question, answer) in iter {
            set.set(question, answer);
        }
        set
    }
}

impl<Q: QuestionKey> Serialize for AnswerSet<Q> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

impl<'de, Q: QuestionKey> Deserialize<'de> for AnswerSet<Q> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAnswers::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw))
    }
}

