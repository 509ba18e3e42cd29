//! End-to-end demo of the question generator and the game session.
//!
//! Run with: `cargo run --example demo`
//!
//! Sections:
//!
//! 1. **One question per operation and tier**, seeded so the output is
//!    reproducible. Shows text, answer, hint and the explanation steps.
//! 2. **A level run**: level 6 played by a scripted player who gets every
//!    third question wrong. Shows scoring, lives and the tutor fallback.
//! 3. **Training mode**: the tier climbs as correct answers accumulate.
//!
//! Set `LOG_LEVEL=debug` (or e.g. `info,session=debug`) to see the engine's
//! tracing output alongside the printed text. `MATH_DRILL_RULES` may point at
//! a TOML file overriding the default game rules.

use math_drill_gen::{
    explain_mistake, generate_question, level_or_first, to_client_payload, to_client_state,
    AnswerOutcome, GameRules, GameSession, HistoryTracker, LevelConfig, OperationKind, Phase,
    QuestionRequest, Tier,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// A level whose number maps onto `tier` and which offers only `op`.
fn single_op_level(op: OperationKind, tier: Tier) -> LevelConfig {
    let level = (tier.get() - 1) * 5 + 1;
    LevelConfig {
        level,
        name: format!("{op} demo"),
        operations: vec![op],
        range: (1, 10),
        time_per_question: 30,
        total_questions: 10,
    }
}

fn print_catalogue() {
    println!("═══ One question per operation and tier ═══\n");
    let mut rng = StdRng::seed_from_u64(2024);
    let mut history = HistoryTracker::new();

    for op in OperationKind::ALL {
        println!("── {op} ──");
        for tier in Tier::all() {
            let config = single_op_level(op, tier);
            let q = generate_question(&mut rng, &mut history, &QuestionRequest::new(&config));
            println!("  {tier}  {:<22} = {:<6} values {:?}", q.text, q.answer, q.values);
        }
        println!();
    }

    let config = single_op_level(OperationKind::Equation, Tier::new(5));
    let q = generate_question(&mut rng, &mut history, &QuestionRequest::new(&config));
    println!("Sample explanation for {} (x = {}):", q.text, q.answer);
    println!("  hint: {}", q.hint.as_deref().unwrap_or("-"));
    for (i, step) in q.explanation_steps().iter().enumerate() {
        println!("  {}. {step}", i + 1);
    }
    println!("\nClient payload:\n{:#}\n", to_client_payload(&q));
}

fn play_level() {
    println!("═══ Level run ═══\n");
    let rules = GameRules::from_env();
    let mut session = GameSession::new(rules, Some(7));
    session.new_game(6);
    println!("{}", level_or_first(6).name);

    let mut turn = 0;
    while session.phase() == Phase::AwaitingAnswer {
        let Some(q) = session.current_question().cloned() else { break };
        turn += 1;
        let answer = if turn % 3 == 0 { (q.answer + 1).to_string() } else { q.answer.to_string() };
        let elapsed = if turn % 2 == 0 { 4.0 } else { 20.0 };

        match session.submit_answer(&answer, elapsed) {
            AnswerOutcome::Correct { points, speed_bonus, streak_bonus } => {
                println!("  {:<12} {answer:<6} ✓ +{points} (speed {speed_bonus}, streak {streak_bonus})", q.text);
            }
            AnswerOutcome::Wrong { correct_answer, lives_left, mistake } => {
                println!("  {:<12} {answer:<6} ✗ answer {correct_answer}, lives {lives_left:?}", q.text);
                let text = explain_mistake(None, &mistake, &q);
                for line in text.lines() {
                    println!("      {line}");
                }
            }
            AnswerOutcome::Ignored => break,
        }
        session.advance();
    }

    println!("\nFinal state:\n{:#}", to_client_state(&session));
    println!("Progress: {}\n", session.progress().to_json().unwrap_or_default());
}

fn play_training() {
    println!("═══ Training ═══\n");
    let mut session = GameSession::new(GameRules::default(), Some(11));
    session.set_operations(vec![OperationKind::Mul, OperationKind::Sqrt, OperationKind::Percentage]);
    session.start_training();

    for n in 0..20 {
        let Some(q) = session.current_question().cloned() else { break };
        let tier = Tier::for_training(n);
        println!("  {tier}  {:<14} = {}", q.text, q.answer);
        session.submit_answer(&q.answer.to_string(), 5.0);
        session.advance();
    }
    println!("\nBest streak: {}", session.stats().best_streak);
}

fn main() {
    init_tracing();
    print_catalogue();
    play_level();
    play_training();
}
