use serde_json::{json, Value};

use crate::question_engine::{OperationKind, Question};
use crate::session::GameSession;

/// Which visual widget a client should pair with the question, if any.
fn visual_for(op: OperationKind) -> Option<&'static str> {
    match op {
        OperationKind::Power                            => Some("grid"),
        OperationKind::Sqrt                             => Some("stepped"),
        OperationKind::Fraction | OperationKind::Percentage => Some("bar"),
        _                                               => None,
    }
}

/// Map a [`Question`] to the JSON shape a rendering client consumes.
///
/// The answer is deliberately left out; grading stays on this side.
pub fn to_client_payload(question: &Question) -> Value {
    json!({
        "text": question.text,
        "opType": question.op_type.code(),
        "values": question.values,
        "hint": question.hint,
        "steps": question.explanation_steps(),
        "visual": visual_for(question.op_type),
    })
}

/// Full screen state for a game view: HUD numbers plus the current question.
pub fn to_client_state(session: &GameSession) -> Value {
    let stats = session.stats();
    json!({
        "phase": session.phase(),
        "level": stats.current_level,
        "questionIndex": stats.question_index,
        "score": stats.score,
        "lives": stats.lives,
        "streak": stats.streak,
        "timePerQuestion": session.time_budget(),
        "question": session.current_question().map(to_client_payload),
    })
}
