//! Post-session questionnaire: Likert scores, the question catalog, and answers.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Five-point agreement scale (1 = strongly disagree, 5 = strongly agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
#[repr(u8)]
pub enum LikertScore {
    StronglyDisagree = 1,
    Disagree = 2,
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl LikertScore {
    /// Creates a score from an integer, returning error if out of range.
    pub fn try_from_i64(field: &str, value: i64) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(LikertScore::StronglyDisagree),
            2 => Ok(LikertScore::Disagree),
            3 => Ok(LikertScore::Neutral),
            4 => Ok(LikertScore::Agree),
            5 => Ok(LikertScore::StronglyAgree),
            _ => Err(ValidationError::out_of_range(
                field,
                1,
                5,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            LikertScore::StronglyDisagree => "Strongly disagree",
            LikertScore::Disagree => "Disagree",
            LikertScore::Neutral => "Neither agree nor disagree",
            LikertScore::Agree => "Agree",
            LikertScore::StronglyAgree => "Strongly agree",
        }
    }
}

impl From<LikertScore> for u8 {
    fn from(score: LikertScore) -> Self {
        score.value()
    }
}

impl TryFrom<i64> for LikertScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        LikertScore::try_from_i64("answer", value)
    }
}

impl fmt::Display for LikertScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Grouping of the survey questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyCategory {
    Motivation,
    Anxiety,
    SelfEfficacy,
    ModelText,
    Reflection,
}

impl SurveyCategory {
    pub fn all() -> &'static [SurveyCategory] {
        &[
            SurveyCategory::Motivation,
            SurveyCategory::Anxiety,
            SurveyCategory::SelfEfficacy,
            SurveyCategory::ModelText,
            SurveyCategory::Reflection,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SurveyCategory::Motivation => "Writing Motivation",
            SurveyCategory::Anxiety => "Writing Anxiety",
            SurveyCategory::SelfEfficacy => "Self-Efficacy",
            SurveyCategory::ModelText => "Usefulness of the Model Text",
            SurveyCategory::Reflection => "Reflection and Task Experience",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurveyQuestion {
    pub id: &'static str,
    pub category: SurveyCategory,
    pub prompt: &'static str,
}

const fn question(
    id: &'static str,
    category: SurveyCategory,
    prompt: &'static str,
) -> SurveyQuestion {
    SurveyQuestion {
        id,
        category,
        prompt,
    }
}

/// The fixed 25-question catalog, grouped five per category.
pub static SURVEY_QUESTIONS: [SurveyQuestion; 25] = [
    question("M1", SurveyCategory::Motivation, "I enjoy writing in English."),
    question("M2", SurveyCategory::Motivation, "I want to improve my English writing ability."),
    question("M3", SurveyCategory::Motivation, "Writing in English will be useful for my future."),
    question("M4", SurveyCategory::Motivation, "I try hard when I write in English."),
    question("M5", SurveyCategory::Motivation, "I would like more chances to write in English."),
    question("A1", SurveyCategory::Anxiety, "I feel nervous when I write in English under time pressure."),
    question("A2", SurveyCategory::Anxiety, "I worry about making grammatical mistakes."),
    question("A3", SurveyCategory::Anxiety, "I feel uneasy when others read my English writing."),
    question("A4", SurveyCategory::Anxiety, "My mind goes blank when I start an English essay."),
    question("A5", SurveyCategory::Anxiety, "I avoid writing in English when I can."),
    question("S1", SurveyCategory::SelfEfficacy, "I can express my ideas clearly in English."),
    question("S2", SurveyCategory::SelfEfficacy, "I can organize an English paragraph logically."),
    question("S3", SurveyCategory::SelfEfficacy, "I can choose appropriate words when writing in English."),
    question("S4", SurveyCategory::SelfEfficacy, "I can find and fix errors in my own writing."),
    question("S5", SurveyCategory::SelfEfficacy, "I can finish a well-structured essay within the time limit."),
    question("F1", SurveyCategory::ModelText, "The model text helped me notice gaps in my writing."),
    question("F2", SurveyCategory::ModelText, "Comparing my text with the model text was easy."),
    question("F3", SurveyCategory::ModelText, "I learned new expressions from the model text."),
    question("F4", SurveyCategory::ModelText, "The model text helped me write my post-test."),
    question("F5", SurveyCategory::ModelText, "I would like to use model texts in future writing tasks."),
    question("R1", SurveyCategory::Reflection, "Recording my errors helped me understand my weaknesses."),
    question("R2", SurveyCategory::Reflection, "Classifying my errors by type was easy."),
    question("R3", SurveyCategory::Reflection, "The brainstorming time was long enough."),
    question("R4", SurveyCategory::Reflection, "The writing time was long enough."),
    question("R5", SurveyCategory::Reflection, "Overall, this writing session was useful to me."),
];

static QUESTION_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    SURVEY_QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, q)| (q.id, idx))
        .collect()
});

/// Looks up a catalog question by id.
pub fn find_question(id: &str) -> Option<&'static SurveyQuestion> {
    QUESTION_INDEX.get(id).map(|idx| &SURVEY_QUESTIONS[*idx])
}

/// Answers recorded so far. Unanswered questions are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyAnswers {
    scores: HashMap<&'static str, LikertScore>,
}

impl SurveyAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or overwrites an answer.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` if the id is not in the catalog
    /// - `OutOfRange` if the value is not 1..=5; existing answers are untouched
    pub fn set(&mut self, question_id: &str, value: i64) -> Result<LikertScore, DomainError> {
        let question = find_question(question_id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("Unknown survey question '{}'", question_id),
            )
            .with_detail("field", question_id)
        })?;
        let score = LikertScore::try_from_i64(question.id, value)?;
        self.scores.insert(question.id, score);
        Ok(score)
    }

    pub fn get(&self, question_id: &str) -> Option<LikertScore> {
        self.scores.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Answered questions in catalog order.
    pub fn answered(&self) -> Vec<(&'static SurveyQuestion, LikertScore)> {
        SURVEY_QUESTIONS
            .iter()
            .filter_map(|q| self.get(q.id).map(|score| (q, score)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_five_questions_per_category() {
        for category in SurveyCategory::all() {
            let count = SURVEY_QUESTIONS
                .iter()
                .filter(|q| q.category == *category)
                .count();
            assert_eq!(count, 5, "{:?}", category);
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        assert_eq!(QUESTION_INDEX.len(), SURVEY_QUESTIONS.len());
    }

    #[test]
    fn likert_accepts_one_through_five() {
        for value in 1..=5 {
            assert_eq!(LikertScore::try_from_i64("M1", value).unwrap().value() as i64, value);
        }
    }

    #[test]
    fn likert_rejects_values_outside_scale() {
        for value in [0, 6, -1, 100] {
            assert!(LikertScore::try_from_i64("M1", value).is_err());
        }
    }

    #[test]
    fn likert_serializes_as_number() {
        assert_eq!(serde_json::to_string(&LikertScore::Agree).unwrap(), "4");
        let score: LikertScore = serde_json::from_str("2").unwrap();
        assert_eq!(score, LikertScore::Disagree);
        assert!(serde_json::from_str::<LikertScore>("9").is_err());
    }

    #[test]
    fn set_overwrites_previous_answer() {
        let mut answers = SurveyAnswers::new();
        answers.set("A2", 2).unwrap();
        answers.set("A2", 5).unwrap();
        assert_eq!(answers.get("A2"), Some(LikertScore::StronglyAgree));
        assert_eq!(answers.answered_count(), 1);
    }

    #[test]
    fn out_of_range_leaves_existing_answer() {
        let mut answers = SurveyAnswers::new();
        answers.set("S3", 3).unwrap();
        let err = answers.set("S3", 9).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(answers.get("S3"), Some(LikertScore::Neutral));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut answers = SurveyAnswers::new();
        let err = answers.set("Z9", 3).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuestionNotFound);
        assert!(answers.is_empty());
    }

    #[test]
    fn answered_follows_catalog_order() {
        let mut answers = SurveyAnswers::new();
        answers.set("R5", 5).unwrap();
        answers.set("M1", 1).unwrap();
        answers.set("S2", 4).unwrap();
        let ids: Vec<_> = answers.answered().iter().map(|(q, _)| q.id).collect();
        assert_eq!(ids, vec!["M1", "S2", "R5"]);
    }
}
