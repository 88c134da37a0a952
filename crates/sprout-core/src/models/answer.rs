use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single response on a screening form.
///
/// Three-valued on purpose: an item answered `No` is scored, an item that
/// was never answered is not.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Answer {
    /// Parse the loose value a form collaborator sends.
    ///
    /// Only the exact strings `"Yes"` and `"No"` are answers. Anything else,
    /// including an empty string or a differently-cased word, is unanswered.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Yes") => Answer::Yes,
            Some("No") => Answer::No,
            _ => Answer::Unanswered,
        }
    }

    /// Wire value, or `None` when unanswered.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Answer::Yes => Some("Yes"),
            Answer::No => Some("No"),
            Answer::Unanswered => None,
        }
    }

    pub fn is_answered(self) -> bool {
        self != Answer::Unanswered
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("unanswered"))
    }
}

/// The closed set of question identifiers for one instrument.
///
/// Implemented by a fieldless enum per instrument. `ALL` lists every
/// variant in form order, and `id` is the stable wire identifier.
pub trait QuestionKey: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn id(self) -> &'static str;

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.id() == id)
    }
}
