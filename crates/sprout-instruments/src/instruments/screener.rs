use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sprout_core::models::answer::{Answer, QuestionKey};
use sprout_core::models::answer_set::{AnswerSet, RawAnswers};

use crate::schema::{question, Domain, QuestionGroup};
use crate::{Instrument, InstrumentResult};

/// Lowest score in the Medium tier.
pub const MEDIUM_RISK_FROM: u8 = 3;
/// Lowest score in the High tier.
pub const HIGH_RISK_FROM: u8 = 8;

/// The 20 items of the behavioral screener, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenerQuestion {
    Q1,
    Q2,
    Q3,
    Q4,
    Q5,
    Q6,
    Q7,
    Q8,
    Q9,
    Q10,
    Q11,
    Q12,
    Q13,
    Q14,
    Q15,
    Q16,
    Q17,
    Q18,
    Q19,
    Q20,
}

impl ScreenerQuestion {
    pub fn text(self) -> &'static str {
        use ScreenerQuestion::*;
        match self {
            Q1 => "Looks where you point across the room",
            Q2 => "Responds when spoken to",
            Q3 => "Plays pretend or make-believe",
            Q4 => "Enjoys climbing on things",
            Q5 => "Uses fingers naturally near the eyes",
            Q6 => "Points to ask for something",
            Q7 => "Points to show something interesting",
            Q8 => "Shows interest in other children",
            Q9 => "Brings things over to show you",
            Q10 => "Responds to own name",
            Q11 => "Smiles back when smiled at",
            Q12 => "Tolerates everyday noises",
            Q13 => "Walks independently",
            Q14 => "Looks you in the eye",
            Q15 => "Copies what you do",
            Q16 => "Looks at what you are looking at",
            Q17 => "Tries to get you to watch them",
            Q18 => "Understands simple requests",
            Q19 => "Checks your face when something new happens",
            Q20 => "Likes movement activities",
        }
    }
}

impl QuestionKey for ScreenerQuestion {
    const ALL: &'static [Self] = &[
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Q5,
        Self::Q6,
        Self::Q7,
        Self::Q8,
        Self::Q9,
        Self::Q10,
        Self::Q11,
        Self::Q12,
        Self::Q13,
        Self::Q14,
        Self::Q15,
        Self::Q16,
        Self::Q17,
        Self::Q18,
        Self::Q19,
        Self::Q20,
    ];

    fn id(self) -> &'static str {
        use ScreenerQuestion::*;
        match self {
            Q1 => "q1",
            Q2 => "q2",
            Q3 => "q3",
            Q4 => "q4",
            Q5 => "q5",
            Q6 => "q6",
            Q7 => "q7",
            Q8 => "q8",
            Q9 => "q9",
            Q10 => "q10",
            Q11 => "q11",
            Q12 => "q12",
            Q13 => "q13",
            Q14 => "q14",
            Q15 => "q15",
            Q16 => "q16",
            Q17 => "q17",
            Q18 => "q18",
            Q19 => "q19",
            Q20 => "q20",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_RISK_FROM {
            RiskTier::High
        } else if score >= MEDIUM_RISK_FROM {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low risk",
            RiskTier::Medium => "Medium risk",
            RiskTier::High => "High risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenerResult {
    pub total_score: u8,
    pub risk_tier: RiskTier,
    pub answered_count: u8,
}

impl ScreenerResult {
    pub fn max_score() -> u8 {
        ScreenerQuestion::ALL.len() as u8
    }

    pub fn is_fully_answered(&self) -> bool {
        self.answered_count == Self::max_score()
    }
}

/// Score a screener answer set.
///
/// Every item answered `No` adds one point. `Yes` and unanswered items add
/// nothing. There are no per-item weights.
pub fn score(answers: &AnswerSet<ScreenerQuestion>) -> ScreenerResult {
    let total_score = answers.count_among(ScreenerQuestion::ALL, Answer::No) as u8;
    ScreenerResult {
        total_score,
        risk_tier: RiskTier::from_score(total_score),
        answered_count: answers.answered_count() as u8,
    }
}

/// 20-item caregiver behavioral screener. Yes/No per item; each `No` scores
/// one point. 0-2 low, 3-7 medium, 8-20 high risk.
pub struct BehaviorScreener;

impl Instrument for BehaviorScreener {
    fn id(&self) -> &str {
        "behavior_screener"
    }

    fn name(&self) -> &str {
        "Behavioral Screener"
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: LazyLock<Vec<Domain>> = LazyLock::new(|| {
            let questions = ScreenerQuestion::ALL
                .iter()
                .map(|q| question(q.id(), q.text()))
                .collect();

            vec![Domain {
                id: "screener_items".to_string(),
                name: "Screener Items".to_string(),
                groups: vec![QuestionGroup {
                    id: "items".to_string(),
                    name: "Items".to_string(),
                    questions,
                }],
                description: Some(
                    "Each No scores 1. 0-2: low risk, 3-7: medium risk, 8+: high risk".to_string(),
                ),
            }]
        });
        &DOMAINS
    }

    fn score_raw(&self, raw: &RawAnswers) -> InstrumentResult {
        InstrumentResult::Screener(score(&AnswerSet::from_raw(raw)))
    }
}
