use chrono::{DateTime, Utc};
use lingo_types::HistoryKind;
use serde::{Deserialize, Serialize};

/// Feedback on a wrong answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MistakeAnalysis {
    pub analysis: String,
    pub grammar_issues: Vec<String>,
    pub vocabulary_issues: Vec<String>,
    pub suggestions: String,
}

/// One practice attempt, stored in the `history` sub-collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub question: String,
    #[serde(default)]
    pub user_answer: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MistakeAnalysis>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// A correctly answered exercise
    pub fn practice(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        Self {
            kind: HistoryKind::Practice,
            question: question.into(),
            user_answer: answer.clone(),
            correct_answer: answer,
            is_correct: true,
            analysis: None,
            created_at: Utc::now(),
        }
    }

    /// A wrong answer, with analysis when one could be produced
    pub fn mistake(
        question: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
        analysis: Option<MistakeAnalysis>,
    ) -> Self {
        Self {
            kind: HistoryKind::Mistake,
            question: question.into(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
            is_correct: false,
            analysis,
            created_at: Utc::now(),
        }
    }
}
