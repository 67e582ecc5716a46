//! Tests for the puzzle session lifecycle.

use strictly_rush_hour::{
    CarDefinition, Cell, CollisionMode, Exit, LevelDefinition, LevelId, MoveError, Orientation,
    Phase, PuzzleSession, Rejection, Slide,
};

/// Hero at (0,2), vertical blocker A covering (2,1)-(2,2).
fn blocked_level() -> LevelDefinition {
    LevelDefinition::new(
        LevelId::Number(8),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("A", Orientation::Vertical, 2, 2, 1),
        ],
    )
}

/// Hero alone on row 2 so every column can be visited.
fn open_level() -> LevelDefinition {
    LevelDefinition::new(
        LevelId::Number(5),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("B", Orientation::Vertical, 3, 0, 3),
        ],
    )
}

#[test]
fn test_win_threshold() {
    for col in 1..4 {
        let mut session = PuzzleSession::start(open_level()).unwrap();
        let outcome = session.request_move("X", col, 2).unwrap();
        assert!(outcome.accepted());
        assert!(!outcome.won(), "col {} should not win", col);
        assert_eq!(session.phase(), Phase::Ready);
    }
    for col in 4..=6 {
        let mut session = PuzzleSession::start(open_level()).unwrap();
        let outcome = session.request_move("X", col, 2).unwrap();
        assert!(outcome.accepted() && outcome.won(), "col {} should win", col);
        assert_eq!(session.phase(), Phase::Won);
    }
}

#[test]
fn test_step_into_blocker_is_rejected() {
    let mut session = PuzzleSession::start(blocked_level()).unwrap();
    let outcome = session.request_move("X", 1, 2).unwrap();
    assert!(!outcome.accepted());
    assert!(!outcome.won());
    assert_eq!(
        outcome.rejection(),
        Some(&Rejection::Collision {
            piece: "X".into(),
            with: "A".into(),
            cell: Cell::new(2, 2),
        })
    );
    assert_eq!(session.board().unwrap().hero().anchor(), Cell::new(0, 2));
    assert_eq!(session.moves(), 0);
}

#[test]
fn test_direct_jump_wins_under_footprint() {
    let mut session = PuzzleSession::start(blocked_level()).unwrap();
    let outcome = session.request_move("X", 4, 2).unwrap();
    assert!(outcome.accepted());
    assert!(outcome.won());
    assert!(session.is_won());
    assert_eq!(session.summary().unwrap().moves(), &1);
}

#[test]
fn test_direct_jump_blocked_under_swept() {
    let mut session =
        PuzzleSession::new(blocked_level()).with_collision_mode(CollisionMode::Swept);
    session.load().unwrap();
    let outcome = session.request_move("X", 4, 2).unwrap();
    assert!(!outcome.accepted());
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::Collision { cell, .. }) if *cell == Cell::new(2, 2)
    ));

    session.request_move("A", 2, 3).unwrap();
    assert!(session.request_move("X", 4, 2).unwrap().won());
}

#[test]
fn test_board_frozen_after_win() {
    let mut session = PuzzleSession::start(blocked_level()).unwrap();
    session.request_move("X", 4, 2).unwrap();
    let before = session.snapshot().unwrap();

    let outcome = session.request_move("A", 2, 3).unwrap();
    assert_eq!(outcome.rejection(), Some(&Rejection::Frozen));
    assert!(outcome.won());
    assert_eq!(session.snapshot().unwrap(), before);
    assert_eq!(session.moves(), 1);
    assert!(session.legal_targets(&"A".into()).unwrap().is_empty());
}

#[test]
fn test_reset_is_idempotent_and_replay_deterministic() {
    let slides = [Slide::to("A", 2, 3), Slide::to("X", 2, 2), Slide::to("A", 2, 0)];

    let mut session = PuzzleSession::start(blocked_level()).unwrap();
    for slide in &slides {
        assert!(session.slide(slide.clone()).unwrap().accepted());
    }
    let first = session.snapshot().unwrap();
    let history = session.history().to_vec();

    session.reset().unwrap();
    let once = session.snapshot().unwrap();
    session.reset().unwrap();
    assert_eq!(session.snapshot().unwrap(), once);
    assert!(session.history().is_empty());

    for slide in &history {
        session.slide(slide.clone()).unwrap();
    }
    assert_eq!(session.snapshot().unwrap(), first);
}

#[test]
fn test_contract_errors() {
    let mut session = PuzzleSession::new(blocked_level());
    assert_eq!(session.request_move("X", 1, 2), Err(MoveError::NotReady));

    session.load().unwrap();
    assert_eq!(
        session.request_move("Q", 1, 1),
        Err(MoveError::InvalidReference("Q".into()))
    );
    assert_eq!(
        session.request_move("A", 3, 1),
        Err(MoveError::OffAxis {
            piece: "A".into(),
            orientation: Orientation::Vertical,
            target: Cell::new(3, 1),
        })
    );
    assert_eq!(session.moves(), 0);
}

#[test]
fn test_out_of_range_targets_are_rejections() {
    let mut session = PuzzleSession::start(blocked_level()).unwrap();
    let negative = session.request_move("A", 2, -1).unwrap();
    assert_eq!(
        negative.rejection(),
        Some(&Rejection::NegativeCoordinate(Cell::new(2, -1)))
    );
    let beyond = session.request_move("A", 2, 5).unwrap();
    assert!(matches!(beyond.rejection(), Some(Rejection::BeyondEdge { .. })));
}

#[test]
fn test_invalid_level_stays_loading() {
    let overlapping = LevelDefinition::new(
        LevelId::Number(2),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("A", Orientation::Vertical, 2, 1, 1),
        ],
    );
    let mut session = PuzzleSession::new(overlapping);
    assert!(session.load().is_err());
    assert_eq!(session.phase(), Phase::Loading);
}
