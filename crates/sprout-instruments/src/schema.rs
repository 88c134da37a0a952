use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// One question as shown on the form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub text: String,
}

/// A cluster of related questions scored together.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionGroup {
    pub id: String,
    pub name: String,
    pub questions: Vec<Question>,
}

/// A top-level domain within an instrument, containing question groups.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub groups: Vec<QuestionGroup>,
    pub description: Option<String>,
}

impl Domain {
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.groups.iter().flat_map(|g| &g.questions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationKind {
    /// The id is not part of this instrument. The answer is ignored.
    UnknownQuestion,
    /// The value is not `"Yes"` or `"No"`. The item counts as unanswered.
    UnrecognizedValue,
}

/// Advisory finding about a raw answer set. Scoring still proceeds.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: String,
    pub value: Option<String>,
    pub kind: ValidationKind,
    pub message: String,
}

pub(crate) fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
    }
}
