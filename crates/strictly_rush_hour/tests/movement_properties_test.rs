//! Property tests for move legality.

use strictly_rush_hour::{
    Board, CarDefinition, Cell, CollisionMode, Exit, InvariantSet, LevelDefinition, LevelId,
    Orientation, PuzzleSession, Rejection, RushHourInvariants, check_move, drag_slide, is_legal,
    reachable_anchors,
};
use strum::IntoEnumIterator;

/// Hero on row 2, vertical blocker A over (2,1)-(2,2), horizontal truck T on row 5,
/// vertical car V at column 5.
fn crowded() -> Board {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("A", Orientation::Vertical, 2, 2, 1),
            CarDefinition::new("T", Orientation::Horizontal, 3, 1, 5),
            CarDefinition::new("V", Orientation::Vertical, 2, 5, 3),
        ],
    );
    Board::from_level(&level).unwrap()
}

#[test]
fn test_negative_coordinates_always_illegal() {
    let board = crowded();
    for piece in board.all_pieces() {
        for target in [
            piece.anchor().with_along(piece.orientation(), -1),
            Cell::new(-1, -1),
            Cell::new(piece.anchor().col, -3),
            Cell::new(-2, piece.anchor().row),
        ] {
            assert!(
                !is_legal(&board, piece, target),
                "{} to {} should be illegal",
                piece.id(),
                target
            );
        }
    }
}

#[test]
fn test_identity_move_always_legal() {
    let board = crowded();
    for mode in CollisionMode::iter() {
        for piece in board.all_pieces() {
            assert_eq!(
                check_move(&board, piece, piece.anchor(), mode),
                Ok(()),
                "{} staying put under {}",
                piece.id(),
                mode
            );
        }
    }
}

#[test]
fn test_collision_rejected_for_either_piece() {
    // X and a horizontal car Y on the same row with one gap between them.
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 0 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 0).hero(),
            CarDefinition::new("Y", Orientation::Horizontal, 2, 3, 0),
        ],
    );
    let board = Board::from_level(&level).unwrap();
    let hero = board.piece(&"X".into()).unwrap();
    let other = board.piece(&"Y".into()).unwrap();

    assert!(matches!(
        check_move(&board, hero, Cell::new(2, 0), CollisionMode::Footprint),
        Err(Rejection::Collision { cell, .. }) if cell == Cell::new(3, 0)
    ));
    assert!(matches!(
        check_move(&board, other, Cell::new(1, 0), CollisionMode::Footprint),
        Err(Rejection::Collision { cell, .. }) if cell == Cell::new(1, 0)
    ));
}

#[test]
fn test_far_edge_bound_by_orientation() {
    for orientation in Orientation::iter() {
        let level = LevelDefinition::new(
            LevelId::Number(1),
            6,
            Exit::Right { row: 5 },
            vec![
                CarDefinition::new("X", Orientation::Horizontal, 2, 3, 5).hero(),
                CarDefinition::new("P", orientation, 3, 0, 0),
            ],
        );
        let board = Board::from_level(&level).unwrap();
        let piece = board.piece(&"P".into()).unwrap();

        let last = piece.anchor().with_along(orientation, 3);
        let beyond = piece.anchor().with_along(orientation, 4);
        assert!(is_legal(&board, piece, last), "{} truck to {}", orientation, last);
        assert!(matches!(
            check_move(&board, piece, beyond, CollisionMode::Footprint),
            Err(Rejection::BeyondEdge { .. })
        ));
    }
}

#[test]
fn test_hero_exit_exception() {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("N", Orientation::Horizontal, 2, 4, 0),
        ],
    );
    let mut board = Board::from_level(&level).unwrap();
    board.apply_move(&"X".into(), Cell::new(4, 2)).unwrap();

    let hero = board.hero();
    assert!(is_legal(&board, hero, Cell::new(5, 2)));

    let other = board.piece(&"N".into()).unwrap();
    assert!(matches!(
        check_move(&board, other, Cell::new(5, 0), CollisionMode::Footprint),
        Err(Rejection::BeyondEdge { .. })
    ));
}

#[test]
fn test_bottom_exit_exception_only_for_hero() {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Bottom { col: 1 },
        vec![
            CarDefinition::new("X", Orientation::Vertical, 2, 1, 0).hero(),
            CarDefinition::new("H", Orientation::Horizontal, 2, 3, 2),
        ],
    );
    let board = Board::from_level(&level).unwrap();
    let horizontal = board.piece(&"H".into()).unwrap();
    assert!(!is_legal(&board, horizontal, Cell::new(5, 2)));
    assert!(is_legal(&board, board.hero(), Cell::new(1, 5)));
    assert!(is_legal(&board, board.hero(), Cell::new(1, 6)));
    assert!(!is_legal(&board, board.hero(), Cell::new(1, 7)));
}

#[test]
fn test_invariants_hold_after_reachable_moves() {
    let mut board = crowded();
    for _ in 0..3 {
        let ids: Vec<_> = board.all_pieces().iter().map(|p| p.id().clone()).collect();
        for id in ids {
            let piece = board.piece(&id).unwrap();
            let targets = reachable_anchors(&board, piece);
            if let Some(target) = targets.last().copied() {
                board.apply_move(&id, target).unwrap();
                assert!(RushHourInvariants::check_all(&board).is_ok(), "{} to {}", id, target);
            }
        }
    }
}

#[test]
fn test_extreme_move_targets_are_rejected() {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("A", Orientation::Vertical, 2, 2, 0),
            CarDefinition::new("B", Orientation::Horizontal, 2, 0, 4),
        ],
    );
    let mut session = PuzzleSession::start(level).unwrap();
    let start = session.snapshot().unwrap();

    for (id, col, row) in [("X", i32::MAX, 2), ("B", i32::MAX, 4), ("A", 2, i32::MAX)] {
        let outcome = session.request_move(id, col, row).unwrap();
        assert!(!outcome.accepted(), "{} to ({}, {}) should be rejected", id, col, row);
        assert!(matches!(
            outcome.rejection(),
            Some(Rejection::BeyondEdge { .. })
        ));
    }

    assert_eq!(session.snapshot().unwrap(), start);
    assert!(RushHourInvariants::check_all(session.board().unwrap()).is_ok());
}

#[test]
fn test_extreme_shifts_are_rejected() {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("A", Orientation::Vertical, 2, 2, 3),
        ],
    );
    let mut session = PuzzleSession::start(level).unwrap();

    let far = session.request_shift("A", i32::MAX).unwrap();
    assert!(matches!(far.rejection(), Some(Rejection::BeyondEdge { .. })));

    let hero = session.request_shift("X", i32::MAX).unwrap();
    assert!(matches!(hero.rejection(), Some(Rejection::BeyondEdge { .. })));

    let back = session.request_shift("A", i32::MIN).unwrap();
    assert!(matches!(
        back.rejection(),
        Some(Rejection::NegativeCoordinate(_))
    ));

    assert_eq!(session.moves(), 0);
    assert!(RushHourInvariants::check_all(session.board().unwrap()).is_ok());
}

#[test]
fn test_huge_drag_is_rejected() {
    let level = LevelDefinition::new(
        LevelId::Number(1),
        6,
        Exit::Right { row: 2 },
        vec![
            CarDefinition::new("X", Orientation::Horizontal, 2, 0, 2).hero(),
            CarDefinition::new("B", Orientation::Horizontal, 2, 1, 4),
        ],
    );
    let mut session = PuzzleSession::start(level).unwrap();
    let piece = session.board().unwrap().piece(&"B".into()).unwrap().clone();

    let slide = drag_slide(&piece, 1e300, 0.0, 60.0);
    assert_eq!(slide.target, Cell::new(i32::MAX, 4));
    let outcome = session.slide(slide).unwrap();
    assert!(matches!(outcome.rejection(), Some(Rejection::BeyondEdge { .. })));
}
