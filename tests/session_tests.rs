//! End-to-end game scenarios driven through the public API with a
//! scripted shape sequence.

use falling_blocks::{
    Cell, Command, SequenceShapes, Session, ShapeKind, COLUMNS, ROWS, SCORING, SPAWN_LOCATION,
};

fn session_with(shapes: Vec<ShapeKind>) -> Session {
    Session::with_source(Box::new(SequenceShapes::new(shapes)))
}

fn drop_and_lock(session: &mut Session, commands: &[Command]) {
    for command in commands {
        session.on_command(*command);
    }
    session.on_command(Command::HardDrop);
    session.on_tick();
}

fn occupied_cells(session: &Session) -> usize {
    (0..ROWS)
        .flat_map(|row| (0..COLUMNS).map(move |col| (row, col)))
        .filter(|(row, col)| session.grid().cell(*row, *col) == Cell::Block)
        .count()
}

#[test]
fn hard_dropped_o_locks_at_the_bottom() {
    let mut session = session_with(vec![ShapeKind::O, ShapeKind::I, ShapeKind::T]);
    assert_eq!(session.piece().location(), SPAWN_LOCATION);

    session.on_command(Command::HardDrop);
    // The drop itself does not lock; gravity does on the next tick.
    assert_eq!(session.piece().kind(), ShapeKind::O);
    assert_eq!(occupied_cells(&session), 0);

    session.on_tick();
    for (row, col) in [(0, 4), (0, 5), (1, 4), (1, 5)] {
        assert_eq!(session.grid().cell(row, col), Cell::Block);
    }
    assert_eq!(occupied_cells(&session), 4);
    assert_eq!(session.piece().kind(), ShapeKind::I);
    assert_eq!(session.next_piece().kind(), ShapeKind::T);
    assert_eq!(session.score(), 0);
    assert_eq!(session.lines(), 0);
    assert!(!session.is_over());
}

#[test]
fn filling_the_bottom_row_clears_one_line() {
    // Two flat I pieces cover columns 0-7 of the bottom row; an O tucked
    // into the right edge completes it while leaving the row above with
    // its two leftover cells.
    let mut session = session_with(vec![
        ShapeKind::I,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::T,
    ]);

    drop_and_lock(
        &mut session,
        &[Command::MoveLeft, Command::MoveLeft, Command::MoveLeft],
    );
    drop_and_lock(&mut session, &[Command::MoveRight]);
    assert_eq!(session.lines(), 0);

    drop_and_lock(
        &mut session,
        &[
            Command::MoveRight,
            Command::MoveRight,
            Command::MoveRight,
            Command::MoveRight,
        ],
    );

    assert_eq!(session.lines(), 1);
    assert_eq!(session.score(), SCORING[1]); // level 1
    assert_eq!(session.level(), 1);
    // The O's upper half slid down into the cleared row.
    assert_eq!(session.grid().cell(0, 8), Cell::Block);
    assert_eq!(session.grid().cell(0, 9), Cell::Block);
    for col in 0..8 {
        assert_eq!(session.grid().cell(0, col), Cell::Empty);
    }
    assert_eq!(occupied_cells(&session), 2);
}

#[test]
fn four_rows_at_once_score_a_tetris() {
    // Nine upright I pieces wall columns 0-8 four rows high, then a
    // tenth drops into the last column and completes all four rows.
    let mut session = session_with(vec![ShapeKind::I; 12]);

    for target_column in 0..10i32 {
        // An upright I occupies the column two right of its anchor.
        let anchor = target_column - 2;
        let mut commands = vec![Command::RotateRight];
        let delta = anchor - SPAWN_LOCATION.column;
        for _ in 0..delta.abs() {
            commands.push(if delta < 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            });
        }
        if target_column == 9 {
            assert_eq!(session.lines(), 0);
            assert_eq!(occupied_cells(&session), 36);
        }
        drop_and_lock(&mut session, &commands);
    }

    assert_eq!(session.lines(), 4);
    assert_eq!(session.score(), SCORING[4]);
    assert_eq!(occupied_cells(&session), 0);
    assert!(!session.is_over());
}

#[test]
fn stacking_to_the_spawn_row_ends_the_game() {
    // O pieces dropped straight down pile two rows at a time; the tenth
    // lock leaves no room for its replacement.
    let mut session = session_with(vec![ShapeKind::O; 12]);

    for _ in 0..9 {
        drop_and_lock(&mut session, &[]);
        assert!(!session.is_over());
    }
    drop_and_lock(&mut session, &[]);
    assert!(session.is_over());

    // The latch is one-way: nothing mutates afterwards.
    let piece = session.piece().clone();
    let cells = occupied_cells(&session);
    let score = session.score();
    for _ in 0..3 {
        session.on_tick();
    }
    session.on_command(Command::MoveLeft);
    session.on_command(Command::RotateRight);
    session.on_command(Command::HardDrop);
    assert!(session.is_over());
    assert_eq!(*session.piece(), piece);
    assert_eq!(occupied_cells(&session), cells);
    assert_eq!(session.score(), score);
}

#[test]
fn new_session_ticks_at_the_level_one_interval() {
    use std::time::Duration;

    let session = session_with(vec![ShapeKind::O]);
    assert_eq!(session.level(), 1);
    assert_eq!(session.tick_interval(), Duration::from_secs_f64(0.9));
}
