//! Explanations for wrong answers.
//!
//! A remote tutor (an LLM behind some HTTP API) implements [`Explainer`]; this
//! crate never performs the call itself. When no explainer is configured or it
//! fails, [`explain_mistake`] falls back to text built from the question's own
//! solution steps, so the player always gets something useful.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::question_engine::Question;

#[derive(Debug, Error)]
pub enum TutorError {
    #[error("tutor request failed: {0}")]
    Request(String),

    #[error("tutor returned an empty explanation")]
    Empty,
}

/// What the tutor is told about a mistake. All fields are opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MistakeReport {
    pub question_text: String,
    pub correct_answer: String,
    pub user_answer: String,
}

impl MistakeReport {
    pub fn new(question: &Question, user_answer: &str) -> Self {
        MistakeReport {
            question_text: question.text.clone(),
            correct_answer: question.answer.to_string(),
            user_answer: user_answer.trim().to_string(),
        }
    }
}

pub trait Explainer {
    fn explain(&self, report: &MistakeReport) -> Result<String, TutorError>;
}

/// Offline explainer: restates the mistake and walks the question's steps.
#[derive(Debug, Clone, Default)]
pub struct StaticExplainer;

impl StaticExplainer {
    pub fn explain_question(&self, report: &MistakeReport, question: &Question) -> String {
        let mut lines = Vec::new();
        if report.user_answer.is_empty() {
            lines.push(format!("No answer was given for {}.", report.question_text));
        } else {
            lines.push(format!(
                "You answered {} for {}, but the answer is {}.",
                report.user_answer, report.question_text, report.correct_answer
            ));
        }
        let steps = question.explanation_steps();
        if !steps.is_empty() {
            lines.push("Here is one way to get there:".to_string());
            lines.extend(steps.iter().enumerate().map(|(i, s)| format!("{}. {s}", i + 1)));
        }
        if let Some(hint) = &question.hint {
            lines.push(format!("Tip: {hint}"));
        }
        lines.join("\n")
    }
}

/// Ask `explainer` (if any) and fall back to the static explanation when it
/// is missing, fails, or returns nothing.
pub fn explain_mistake(
    explainer: Option<&dyn Explainer>,
    report: &MistakeReport,
    question: &Question,
) -> String {
    let Some(explainer) = explainer else {
        return StaticExplainer.explain_question(report, question);
    };
    match explainer.explain(report) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!(target: "tutor", question = %report.question_text, error = %TutorError::Empty, "using static explanation");
            StaticExplainer.explain_question(report, question)
        }
        Err(e) => {
            warn!(target: "tutor", question = %report.question_text, error = %e, "using static explanation");
            StaticExplainer.explain_question(report, question)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question_engine::OperationKind;

    fn sqrt_question() -> Question {
        Question {
            text: "√81".into(),
            answer: 9,
            op_type: OperationKind::Sqrt,
            values: vec![81],
            hint: Some("Which number times itself = 81?".into()),
            explanation: Some("INVESTIGATE: ?|CONFIRM: 9 × 9 = 81.".into()),
        }
    }

    struct Failing;
    impl Explainer for Failing {
        fn explain(&self, _: &MistakeReport) -> Result<String, TutorError> {
            Err(TutorError::Request("503".into()))
        }
    }

    struct Canned;
    impl Explainer for Canned {
        fn explain(&self, _: &MistakeReport) -> Result<String, TutorError> {
            Ok("Nine nines are eighty-one.".into())
        }
    }

    #[test]
    fn report_carries_opaque_strings() {
        let r = MistakeReport::new(&sqrt_question(), " 8 ");
        assert_eq!(r.question_text, "√81");
        assert_eq!(r.correct_answer, "9");
        assert_eq!(r.user_answer, "8");
    }

    #[test]
    fn remote_text_is_used_when_available() {
        let q = sqrt_question();
        let r = MistakeReport::new(&q, "8");
        assert_eq!(explain_mistake(Some(&Canned as &dyn Explainer), &r, &q), "Nine nines are eighty-one.");
    }

    #[test]
    fn failure_falls_back_to_question_steps() {
        let q = sqrt_question();
        let r = MistakeReport::new(&q, "8");
        let text = explain_mistake(Some(&Failing as &dyn Explainer), &r, &q);
        assert!(text.contains("You answered 8 for √81, but the answer is 9."));
        assert!(text.contains("2. CONFIRM: 9 × 9 = 81."));
        assert!(text.contains("Tip: Which number times itself = 81?"));
    }

    #[test]
    fn no_explainer_uses_static_text() {
        let q = sqrt_question();
        let r = MistakeReport::new(&q, "");
        let text = explain_mistake(None, &r, &q);
        assert!(text.starts_with("No answer was given for √81."));
    }
}
