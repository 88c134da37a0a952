use sprout_core::models::answer::{Answer, QuestionKey};
use sprout_core::models::answer_set::{AnswerSet, RawAnswers};
use sprout_instruments::instruments::screener::{score, RiskTier, ScreenerQuestion, ScreenerResult};

/// The first `no_count` items answered No, the rest Yes.
fn answers_with_no_count(no_count: usize) -> AnswerSet<ScreenerQuestion> {
    ScreenerQuestion::ALL
        .iter()
        .enumerate()
        .map(|(i, q)| (*q, if i < no_count { Answer::No } else { Answer::Yes }))
        .collect()
}

#[test]
fn all_no_scores_twenty_high() {
    let result = score(&answers_with_no_count(20));
    assert_eq!(result.total_score, 20);
    assert_eq!(result.risk_tier, RiskTier::High);
    assert!(result.is_fully_answered());
}

#[test]
fn first_three_no_scores_three_medium() {
    let answers = AnswerSet::from_json(
        r#"{"q1":"No","q2":"No","q3":"No","q4":"Yes","q5":"Yes","q6":"Yes","q7":"Yes",
            "q8":"Yes","q9":"Yes","q10":"Yes","q11":"Yes","q12":"Yes","q13":"Yes",
            "q14":"Yes","q15":"Yes","q16":"Yes","q17":"Yes","q18":"Yes","q19":"Yes","q20":"Yes"}"#,
    )
    .unwrap();
    let result = score(&answers);
    assert_eq!(result.total_score, 3);
    assert_eq!(result.risk_tier, RiskTier::Medium);
    assert_eq!(result.answered_count, 20);
}

#[test]
fn tier_boundaries_are_exact() {
    let tier = |n| score(&answers_with_no_count(n)).risk_tier;
    assert_eq!(tier(0), RiskTier::Low);
    assert_eq!(tier(2), RiskTier::Low);
    assert_eq!(tier(3), RiskTier::Medium);
    assert_eq!(tier(7), RiskTier::Medium);
    assert_eq!(tier(8), RiskTier::High);
}

#[test]
fn score_equals_no_count_for_every_prefix() {
    for n in 0..=20 {
        let result = score(&answers_with_no_count(n));
        assert_eq!(result.total_score as usize, n);
        assert!(result.total_score <= ScreenerResult::max_score());
    }
}

#[test]
fn empty_answer_set_is_zero_low() {
    let result = score(&AnswerSet::new());
    assert_eq!(result.total_score, 0);
    assert_eq!(result.risk_tier, RiskTier::Low);
    assert_eq!(result.answered_count, 0);
    assert!(!result.is_fully_answered());
}

#[test]
fn unanswered_items_do_not_score() {
    let answers = AnswerSet::new()
        .with(ScreenerQuestion::Q4, Answer::No)
        .with(ScreenerQuestion::Q9, Answer::Yes);
    let result = score(&answers);
    assert_eq!(result.total_score, 1);
    assert_eq!(result.answered_count, 2);
}

#[test]
fn unknown_and_malformed_entries_are_ignored() {
    let raw: RawAnswers = [
        ("q1", Some("No")),
        ("q2", Some("no")),
        ("q3", Some("")),
        ("q21", Some("No")),
        ("extra", Some("No")),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
    .collect();

    let result = score(&AnswerSet::from_raw(&raw));
    assert_eq!(result.total_score, 1);
    assert_eq!(result.answered_count, 1);
}

#[test]
fn scoring_is_idempotent() {
    let answers = answers_with_no_count(9);
    assert_eq!(score(&answers), score(&answers));
}

#[test]
fn changed_answer_recomputes_from_scratch() {
    let mut answers = answers_with_no_count(8);
    assert_eq!(score(&answers).risk_tier, RiskTier::High);

    answers.set(ScreenerQuestion::Q1, Answer::Yes);
    let result = score(&answers);
    assert_eq!(result.total_score, 7);
    assert_eq!(result.risk_tier, RiskTier::Medium);
}
