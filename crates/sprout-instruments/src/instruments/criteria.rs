use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use sprout_core::models::answer::{Answer, QuestionKey};
use sprout_core::models::answer_set::{AnswerSet, RawAnswers};

use crate::schema::{question, Domain, QuestionGroup};
use crate::{Instrument, InstrumentResult};

/// Groups that must be met within a domain for that domain to count.
pub const REQUIRED_GROUPS_PER_DOMAIN: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CriteriaQuestion {
    A1_1,
    A1_2,
    A1_3,
    A2_1,
    A2_2,
    A2_3,
    A3_1,
    A3_2,
    A3_3,
    B1_1,
    B1_2,
    B1_3,
    B2_1,
    B2_2,
    B3_1,
    B3_2,
    B4_1,
    B4_2,
    /// Symptoms present in the early developmental period.
    C,
    /// Symptoms cause clinically significant impairment.
    D,
}

impl CriteriaQuestion {
    pub fn text(self) -> &'static str {
        use CriteriaQuestion::*;
        match self {
            A1_1 => "Abnormal social approach or failure of back-and-forth conversation",
            A1_2 => "Reduced sharing of interests, emotions, or affect",
            A1_3 => "Failure to initiate or respond to social interactions",
            A2_1 => "Poorly integrated verbal and nonverbal communication",
            A2_2 => "Abnormalities in eye contact and body language",
            A2_3 => "Lack of facial expressions or gestures",
            A3_1 => "Difficulty adjusting behavior to social contexts",
            A3_2 => "Difficulty sharing imaginative play or making friends",
            A3_3 => "Absence of interest in peers",
            B1_1 => "Simple motor stereotypies",
            B1_2 => "Lining up toys or flipping objects",
            B1_3 => "Echolalia or idiosyncratic phrases",
            B2_1 => "Extreme distress at small changes or difficulty with transitions",
            B2_2 => "Rigid thinking patterns or greeting rituals",
            B3_1 => "Strong attachment to or preoccupation with unusual objects",
            B3_2 => "Excessively circumscribed or perseverative interests",
            B4_1 => "Indifference to pain or temperature, or adverse response to sounds or textures",
            B4_2 => "Excessive smelling or touching of objects, or visual fascination with lights",
            C => "Symptoms present in the early developmental period",
            D => "Symptoms cause clinically significant impairment in daily functioning",
        }
    }
}

impl QuestionKey for CriteriaQuestion {
    const ALL: &'static [Self] = &[
        Self::A1_1,
        Self::A1_2,
        Self::A1_3,
        Self::A2_1,
        Self::A2_2,
        Self::A2_3,
        Self::A3_1,
        Self::A3_2,
        Self::A3_3,
        Self::B1_1,
        Self::B1_2,
        Self::B1_3,
        Self::B2_1,
        Self::B2_2,
        Self::B3_1,
        Self::B3_2,
        Self::B4_1,
        Self::B4_2,
        Self::C,
        Self::D,
    ];

    fn id(self) -> &'static str {
        use CriteriaQuestion::*;
        match self {
            A1_1 => "A1_1",
            A1_2 => "A1_2",
            A1_3 => "A1_3",
            A2_1 => "A2_1",
            A2_2 => "A2_2",
            A2_3 => "A2_3",
            A3_1 => "A3_1",
            A3_2 => "A3_2",
            A3_3 => "A3_3",
            B1_1 => "B1_1",
            B1_2 => "B1_2",
            B1_3 => "B1_3",
            B2_1 => "B2_1",
            B2_2 => "B2_2",
            B3_1 => "B3_1",
            B3_2 => "B3_2",
            B4_1 => "B4_1",
            B4_2 => "B4_2",
            C => "C",
            D => "D",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CriteriaDomain {
    /// Social communication and interaction.
    A,
    /// Restricted, repetitive patterns of behavior.
    B,
}

impl CriteriaDomain {
    pub fn groups(self) -> &'static [CriteriaGroup] {
        use CriteriaGroup::*;
        match self {
            CriteriaDomain::A => &[A1, A2, A3],
            CriteriaDomain::B => &[B1, B2, B3, B4],
        }
    }

    /// Groups that must be met for this domain to count.
    pub fn required_groups(self) -> u8 {
        REQUIRED_GROUPS_PER_DOMAIN
    }

    pub fn name(self) -> &'static str {
        match self {
            CriteriaDomain::A => "Social Communication and Interaction",
            CriteriaDomain::B => "Restricted, Repetitive Behaviors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CriteriaGroup {
    A1,
    A2,
    A3,
    B1,
    B2,
    B3,
    B4,
}

impl CriteriaGroup {
    pub const ALL: &'static [Self] = &[
        Self::A1,
        Self::A2,
        Self::A3,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
    ];

    pub fn questions(self) -> &'static [CriteriaQuestion] {
        use CriteriaQuestion::*;
        match self {
            CriteriaGroup::A1 => &[A1_1, A1_2, A1_3],
            CriteriaGroup::A2 => &[A2_1, A2_2, A2_3],
            CriteriaGroup::A3 => &[A3_1, A3_2, A3_3],
            CriteriaGroup::B1 => &[B1_1, B1_2, B1_3],
            CriteriaGroup::B2 => &[B2_1, B2_2],
            CriteriaGroup::B3 => &[B3_1, B3_2],
            CriteriaGroup::B4 => &[B4_1, B4_2],
        }
    }

    pub fn domain(self) -> CriteriaDomain {
        match self {
            CriteriaGroup::A1 | CriteriaGroup::A2 | CriteriaGroup::A3 => CriteriaDomain::A,
            _ => CriteriaDomain::B,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            CriteriaGroup::A1 => "A1",
            CriteriaGroup::A2 => "A2",
            CriteriaGroup::A3 => "A3",
            CriteriaGroup::B1 => "B1",
            CriteriaGroup::B2 => "B2",
            CriteriaGroup::B3 => "B3",
            CriteriaGroup::B4 => "B4",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CriteriaGroup::A1 => "Social-Emotional Reciprocity",
            CriteriaGroup::A2 => "Nonverbal Communicative Behaviors",
            CriteriaGroup::A3 => "Developing and Maintaining Relationships",
            CriteriaGroup::B1 => "Stereotyped or Repetitive Movements and Speech",
            CriteriaGroup::B2 => "Insistence on Sameness",
            CriteriaGroup::B3 => "Restricted, Fixated Interests",
            CriteriaGroup::B4 => "Sensory Reactivity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupResult {
    pub group: CriteriaGroup,
    /// Sub-questions answered `Yes`.
    pub yes_count: u8,
    /// At least one symptom in the group is present.
    pub met: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainResult {
    pub domain: CriteriaDomain,
    pub groups_met: u8,
    pub group_count: u8,
    /// `groups_met` reached [`CriteriaDomain::required_groups`].
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriteriaResult {
    /// One entry per group, in `CriteriaGroup::ALL` order.
    pub groups: Vec<GroupResult>,
    pub domain_a: DomainResult,
    pub domain_b: DomainResult,
    pub early_onset: bool,
    pub clinical_impairment: bool,
    pub meets_criteria: bool,
}

impl CriteriaResult {
    pub fn group(&self, group: CriteriaGroup) -> Option<&GroupResult> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn domain(&self, domain: CriteriaDomain) -> &DomainResult {
        match domain {
            CriteriaDomain::A => &self.domain_a,
            CriteriaDomain::B => &self.domain_b,
        }
    }

    pub fn interpretation(&self) -> &'static str {
        if self.meets_criteria {
            "Meets criteria"
        } else {
            "Does not meet criteria"
        }
    }
}

fn evaluate_group(answers: &AnswerSet<CriteriaQuestion>, group: CriteriaGroup) -> GroupResult {
    let yes_count = answers.count_among(group.questions(), Answer::Yes) as u8;
    GroupResult {
        group,
        yes_count,
        met: yes_count > 0,
    }
}

fn evaluate_domain(groups: &[GroupResult], domain: CriteriaDomain) -> DomainResult {
    let groups_met = groups
        .iter()
        .filter(|g| g.met && g.group.domain() == domain)
        .count() as u8;
    DomainResult {
        domain,
        groups_met,
        group_count: domain.groups().len() as u8,
        met: groups_met >= domain.required_groups(),
    }
}

/// Evaluate a criteria checklist answer set.
///
/// A group is met by a single `Yes`. A domain is met when at least two of
/// its groups are. The determination needs both domains plus `Yes` on the
/// onset (C) and impairment (D) questions.
pub fn evaluate(answers: &AnswerSet<CriteriaQuestion>) -> CriteriaResult {
    let groups: Vec<GroupResult> = CriteriaGroup::ALL
        .iter()
        .map(|g| evaluate_group(answers, *g))
        .collect();

    let domain_a = evaluate_domain(&groups, CriteriaDomain::A);
    let domain_b = evaluate_domain(&groups, CriteriaDomain::B);
    let early_onset = answers.get(CriteriaQuestion::C) == Answer::Yes;
    let clinical_impairment = answers.get(CriteriaQuestion::D) == Answer::Yes;

    CriteriaResult {
        meets_criteria: domain_a.met && domain_b.met && early_onset && clinical_impairment,
        groups,
        domain_a,
        domain_b,
        early_onset,
        clinical_impairment,
    }
}

/// DSM-5 style criteria checklist. Domain A has three groups, domain B four;
/// each domain needs two groups with at least one symptom present, plus
/// early onset and clinical impairment.
pub struct CriteriaChecklist;

impl Instrument for CriteriaChecklist {
    fn id(&self) -> &str {
        "criteria_checklist"
    }

    fn name(&self) -> &str {
        "Diagnostic Criteria Checklist"
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: LazyLock<Vec<Domain>> = LazyLock::new(|| {
            let symptom_domain = |domain: CriteriaDomain, id: &str| Domain {
                id: id.to_string(),
                name: domain.name().to_string(),
                groups: domain
                    .groups()
                    .iter()
                    .map(|g| QuestionGroup {
                        id: g.id().to_string(),
                        name: g.name().to_string(),
                        questions: g
                            .questions()
                            .iter()
                            .map(|q| question(q.id(), q.text()))
                            .collect(),
                    })
                    .collect(),
                description: Some(format!(
                    "Met when at least {} of {} groups have a symptom present",
                    domain.required_groups(),
                    domain.groups().len()
                )),
            };

            let standalone = |q: CriteriaQuestion, name: &str| QuestionGroup {
                id: q.id().to_string(),
                name: name.to_string(),
                questions: vec![question(q.id(), q.text())],
            };

            vec![
                symptom_domain(CriteriaDomain::A, "domain_a"),
                symptom_domain(CriteriaDomain::B, "domain_b"),
                Domain {
                    id: "onset_and_impairment".to_string(),
                    name: "Onset and Impairment".to_string(),
                    groups: vec![
                        standalone(CriteriaQuestion::C, "Early Onset"),
                        standalone(CriteriaQuestion::D, "Clinical Impairment"),
                    ],
                    description: Some("Both must be answered Yes".to_string()),
                },
            ]
        });
        &DOMAINS
    }

    fn score_raw(&self, raw: &RawAnswers) -> InstrumentResult {
        InstrumentResult::Criteria(evaluate(&AnswerSet::from_raw(raw)))
    }
}
