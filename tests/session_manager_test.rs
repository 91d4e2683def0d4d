//! Tests for the session store.

use std::sync::Arc;

use mastermind::{
    Code, FixedSource, GameConfig, GameSession, GameStatus, GuessError, SessionError,
    SessionManager, SetupError, SourceError,
};

fn manager_with(secret: [i32; 4]) -> SessionManager {
    SessionManager::new(Arc::new(FixedSource::new(secret)))
}

#[tokio::test]
async fn test_start_game_returns_fresh_view() {
    let manager = manager_with([1, 1, 2, 4]);
    let view = manager
        .start_game("alice".to_string(), GameConfig::default())
        .await
        .expect("Start failed");

    assert_eq!(*view.status(), GameStatus::InProgress);
    assert_eq!(*view.attempts_remaining(), 10);
    assert!(view.history().is_empty());
    assert!(view.secret().is_none());
    assert_eq!(manager.list_sessions().unwrap(), vec!["alice".to_string()]);
}

#[tokio::test]
async fn test_submit_guess_updates_stored_game() {
    let manager = manager_with([1, 1, 2, 4]);
    manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();

    let view = manager.submit_guess("alice", vec![1, 7, 6, 4]).unwrap();
    assert_eq!(*view.attempts_remaining(), 9);
    assert_eq!(
        view.feedback(),
        &vec!["2 correct number(s) and 2 correct location(s).".to_string()]
    );

    let view = manager.submit_guess("alice", vec![1, 1, 2, 4]).unwrap();
    assert!(*view.has_won());
    assert_eq!(view.secret(), &Some(Code::from([1, 1, 2, 4])));
    assert_eq!(manager.view("alice").unwrap(), view);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let source = FixedSource::sequence(vec![Code::from([1, 2, 3, 4]), Code::from([4, 3, 2, 1])]);
    let manager = SessionManager::new(Arc::new(source));
    manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();
    manager.start_game("bob".to_string(), GameConfig::default()).await.unwrap();

    let alice = manager.submit_guess("alice", vec![1, 2, 3, 4]).unwrap();
    assert!(*alice.has_won());

    let bob = manager.view("bob").unwrap();
    assert_eq!(*bob.attempts_remaining(), 10);
    assert!(!*bob.is_over());
}

#[tokio::test]
async fn test_new_game_replaces_old_one() {
    let manager = manager_with([1, 1, 2, 4]);
    manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();
    manager.submit_guess("alice", vec![0, 0, 0, 0]).unwrap();

    let view = manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();
    assert_eq!(*view.attempts_remaining(), 10);
    assert_eq!(manager.list_sessions().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejected_guess_surfaces_guess_error() {
    let manager = manager_with([1, 1, 2, 4]);
    manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();

    let err = manager.submit_guess("alice", vec![1, 2]).unwrap_err();
    assert_eq!(err, SessionError::Guess(GuessError::LengthMismatch { expected: 4, actual: 2 }));
    assert_eq!(*manager.view("alice").unwrap().attempts_remaining(), 10);
}

#[tokio::test]
async fn test_unknown_session() {
    let manager = manager_with([1, 1, 2, 4]);
    assert_eq!(
        manager.submit_guess("nobody", vec![1, 1, 2, 4]),
        Err(SessionError::NotFound("nobody".to_string()))
    );
    assert!(matches!(manager.view("nobody"), Err(SessionError::NotFound(_))));
}

#[tokio::test]
async fn test_source_failure_is_reported() {
    let manager = manager_with([1, 1, 2, 4]);
    let config = GameConfig::from_difficulty(mastermind::Difficulty::Medium);
    let err = manager.start_game("alice".to_string(), config).await.unwrap_err();
    assert_eq!(err, SessionError::Source(SourceError::WrongCount { expected: 6, actual: 4 }));
    assert!(manager.list_sessions().unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_and_reinsert_session() {
    let manager = manager_with([1, 1, 2, 4]);
    manager.start_game("alice".to_string(), GameConfig::default()).await.unwrap();
    manager.submit_guess("alice", vec![0, 0, 0, 0]).unwrap();

    let stored = manager.remove_session("alice").unwrap().expect("session present");
    assert!(manager.get_session("alice").unwrap().is_none());

    manager.insert_session("alice".to_string(), stored.clone()).unwrap();
    assert_eq!(manager.get_session("alice").unwrap(), Some(stored));
}

#[test]
fn test_setup_error_converts() {
    let err: SessionError = SetupError::EmptyCode.into();
    assert!(matches!(err, SessionError::Setup(SetupError::EmptyCode)));
    assert_eq!(
        GameSession::new(GameConfig::default(), Code::from([1])).unwrap_err(),
        SetupError::SecretLengthMismatch {
            expected: 4,
            actual: 1
        }
    );
}

#[tokio::test]
async fn test_stored_rules_are_validated_before_start() {
    let inverted = r#"{"symbol_count":4,"range":{"lower":7,"upper":0},"max_attempts":10}"#;
    assert!(serde_json::from_str::<GameConfig>(inverted).is_err());

    let manager = manager_with([1, 1, 2, 4]);
    let stored = r#"{"symbol_count":4,"range":{"lower":0,"upper":7},"max_attempts":10}"#;
    let config: GameConfig = serde_json::from_str(stored).expect("valid stored rules");
    let view = manager.start_game("alice".to_string(), config).await.unwrap();
    assert_eq!(*view.attempts_remaining(), 10);
}
