use sprout_core::models::answer_set::RawAnswers;
use sprout_instruments::error::InstrumentError;
use sprout_instruments::instruments::screener::RiskTier;
use sprout_instruments::schema::ValidationKind;
use sprout_instruments::{all_instruments, get_instrument, require_instrument, InstrumentResult};

fn raw(pairs: &[(&str, &str)]) -> RawAnswers {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}

#[test]
fn registry_lists_both_instruments() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["behavior_screener", "criteria_checklist"]);
}

#[test]
fn unknown_instrument_is_an_error() {
    assert!(get_instrument("cars2").is_none());
    let err = require_instrument("cars2").err().unwrap();
    assert!(matches!(err, InstrumentError::UnknownInstrument(id) if id == "cars2"));
}

#[test]
fn catalogues_cover_every_question() {
    let screener = get_instrument("behavior_screener").unwrap();
    let count: usize = screener.domains().iter().map(|d| d.questions().count()).sum();
    assert_eq!(count, 20);

    let checklist = get_instrument("criteria_checklist").unwrap();
    let count: usize = checklist.domains().iter().map(|d| d.questions().count()).sum();
    assert_eq!(count, 20);
    assert_eq!(checklist.domains().len(), 3);
}

#[test]
fn score_raw_dispatches_by_instrument() {
    let screener = require_instrument("behavior_screener").unwrap();
    match screener.score_raw(&raw(&[("q1", "No"), ("q2", "No"), ("q3", "No")])) {
        InstrumentResult::Screener(r) => {
            assert_eq!(r.total_score, 3);
            assert_eq!(r.risk_tier, RiskTier::Medium);
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let checklist = require_instrument("criteria_checklist").unwrap();
    match checklist.score_raw(&raw(&[("A1_1", "Yes"), ("C", "Yes"), ("D", "Yes")])) {
        InstrumentResult::Criteria(r) => {
            assert_eq!(r.domain_a.groups_met, 1);
            assert!(!r.meets_criteria);
            assert_eq!(
                InstrumentResult::Criteria(r).summary(),
                "Does not meet criteria (A: 1/3 groups, B: 0/4 groups, onset: yes, impairment: yes)"
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn validation_flags_unknown_ids_and_values() {
    let screener = require_instrument("behavior_screener").unwrap();
    let errors = screener.validate_answers(&raw(&[
        ("q1", "No"),
        ("q2", "Maybe"),
        ("q3", ""),
        ("q42", "Yes"),
    ]));

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].question_id, "q2");
    assert_eq!(errors[0].kind, ValidationKind::UnrecognizedValue);
    assert_eq!(errors[1].question_id, "q42");
    assert_eq!(errors[1].kind, ValidationKind::UnknownQuestion);

    assert!(screener.check_answers(&raw(&[("q1", "Yes")])).is_ok());
    assert!(matches!(
        screener.check_answers(&raw(&[("q42", "Yes")])),
        Err(InstrumentError::Validation(_))
    ));
}

#[test]
fn structured_input_shows_unanswered_items_and_result() {
    let checklist = require_instrument("criteria_checklist").unwrap();
    let text = checklist.to_structured_input(&raw(&[("A1_1", "Yes"), ("B2_1", "No")]));

    assert!(text.starts_with("## Diagnostic Criteria Checklist"));
    assert!(text.contains("### Social Communication and Interaction"));
    assert!(text.contains("- Abnormal social approach or failure of back-and-forth conversation: Yes"));
    assert!(text.contains("- Rigid thinking patterns or greeting rituals: unanswered"));
    assert!(text.contains("Result: Does not meet criteria (A: 1/3 groups, B: 0/4 groups"));
}

#[test]
fn result_serializes_with_instrument_tag() {
    let screener = require_instrument("behavior_screener").unwrap();
    let json = serde_json::to_value(screener.score_raw(&RawAnswers::new())).unwrap();
    assert_eq!(json["instrument"], "screener");
    assert_eq!(json["result"]["total_score"], 0);
    assert_eq!(json["result"]["risk_tier"], "low");
}
