use std::sync::Arc;

use quiz_core::model::{AdvanceMode, Difficulty, SentenceItem, SessionConfig, VocabularyItem};
use quiz_core::time::{fixed_clock, fixed_now};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{
    AdvancedSession, BeginnerSession, QuizEvent, QuizIntent, QuizLoopService, QuizSnapshot,
    SessionError, SessionPhase,
};
use storage::InMemoryRepository;

fn vocabulary() -> Vec<VocabularyItem> {
    [
        ("eat", "makan"),
        ("drink", "minum"),
        ("sleep", "tidur"),
        ("read", "baca"),
        ("write", "tulis"),
        ("walk", "jalan"),
    ]
    .iter()
    .map(|(original, translated)| VocabularyItem::new(*original, *translated).unwrap())
    .collect()
}

fn sentences() -> Vec<SentenceItem> {
    vec![
        SentenceItem::from_text("I like to eat", "saya suka makan").unwrap(),
        SentenceItem::from_text("he drinks water", "dia minum air").unwrap(),
    ]
}

#[test]
fn beginner_game_runs_to_completion() {
    let config = SessionConfig::new(5, 4).unwrap();
    let mut session =
        BeginnerSession::start(&vocabulary(), &config, &mut StdRng::seed_from_u64(2024))
            .unwrap()
            .with_clock(fixed_clock());
    assert_eq!(session.total_questions(), 5);

    for round in 0..5 {
        let expected = session.current_question().unwrap().original().to_owned();
        let answer = if round < 3 {
            expected
        } else {
            session
                .current_options()
                .iter()
                .find(|option| **option != expected)
                .cloned()
                .unwrap()
        };
        session.submit_answer(&answer).unwrap();
    }

    assert_eq!(session.phase(), SessionPhase::Finished);
    assert_eq!(session.score(), 3);
    assert_eq!(session.current_index(), 5);

    let result = session.result().unwrap();
    assert_eq!(result.score, 3);
    assert_eq!(result.total, 5);
    assert_eq!(result.pool_size, 6);
    assert_eq!(result.completed_at, fixed_now());
    assert!((result.ratio() - 0.6).abs() < f64::EPSILON);

    assert!(matches!(
        session.submit_answer("eat"),
        Err(SessionError::Completed)
    ));
    assert_eq!(session.result().unwrap(), result);
}

#[test]
fn advanced_wrong_order_resets_selection_and_moves_on() {
    let config = SessionConfig::new(2, 4).unwrap();
    let mut session = AdvancedSession::start(&sentences(), &config, &mut StdRng::seed_from_u64(5))
        .unwrap();

    let mut words = session.current_sentence().unwrap().translated_words().to_vec();
    words.swap(0, 1);
    for word in &words {
        session.select_token(word).unwrap();
    }

    let progress = session.progress();
    assert_eq!(progress.answered, 1);
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_index(), 1);
    assert!(session.selected_words().is_empty());

    let next = session.current_sentence().unwrap();
    assert_eq!(session.remaining_words().len(), next.word_count());
    assert_eq!(session.phase(), SessionPhase::Active);
}

#[test]
fn manual_advance_through_intents() {
    let config = SessionConfig::new(1, 4)
        .unwrap()
        .with_advance_mode(AdvanceMode::Manual);
    let mut session = services::QuizSession::Advanced(
        AdvancedSession::start(&sentences()[..1], &config, &mut StdRng::seed_from_u64(9))
            .unwrap(),
    );

    for word in ["saya", "suka", "makan"] {
        session.dispatch(QuizIntent::SelectWord(word.into())).unwrap();
    }
    let pending = session.pending_feedback().cloned().unwrap();
    assert!(pending.correct);
    assert_eq!(session.progress().score, 0);

    let QuizSnapshot::Advanced(snapshot) = session.snapshot() else {
        panic!("advanced snapshot expected");
    };
    assert_eq!(snapshot.feedback.as_ref(), Some(&pending));
    assert_eq!(snapshot.selected, ["saya", "suka", "makan"]);

    let event = session.dispatch(QuizIntent::Advance).unwrap();
    assert_eq!(
        event,
        QuizEvent::Advanced {
            feedback: pending,
            finished: true
        }
    );
    assert_eq!(session.result().unwrap().score, 1);
    assert!(matches!(
        session.dispatch(QuizIntent::Advance),
        Err(SessionError::Completed)
    ));
}

#[tokio::test]
async fn loop_service_plays_from_repository() {
    let repo = InMemoryRepository::new();
    for item in vocabulary() {
        repo.push_vocabulary(item).unwrap();
    }
    for item in sentences() {
        repo.push_sentence(item).unwrap();
    }

    let service = QuizLoopService::new(
        fixed_clock(),
        Arc::new(repo),
        SessionConfig::new(4, 4).unwrap(),
    );
    let mut rng = StdRng::seed_from_u64(77);
    let mut session = service
        .start_session(Difficulty::Beginner, &mut rng)
        .await
        .unwrap();

    while !session.is_complete() {
        let QuizSnapshot::Beginner(snapshot) = session.snapshot() else {
            panic!("beginner snapshot expected");
        };
        let event = session
            .dispatch(QuizIntent::SelectOption(snapshot.options[0].clone()))
            .unwrap();
        assert!(matches!(event, QuizEvent::Answered { .. }));
    }

    let result = session.result().unwrap();
    assert_eq!(result.total, 4);
    assert!(result.score <= result.total);
    assert_eq!(result.started_at, fixed_now());
}
