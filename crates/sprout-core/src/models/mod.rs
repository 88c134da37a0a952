pub mod answer;
pub mod answer_set;
