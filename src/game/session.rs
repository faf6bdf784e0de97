use std::time::Duration;

use crate::config::{
    BASE_INTERVAL_SECS, COLUMNS, LEVEL_SPEEDUP_SECS, LINES_PER_LEVEL, MIN_INTERVAL_SECS, ROWS,
    SCORING,
};
use crate::game::{Cell, Grid, Piece, RandomShapes, ShapeSource, SPAWN_LOCATION};

/// Discrete player actions, delivered by the input shell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateRight,
    RotateLeft,
    HardDrop,
}

/// One game in progress: the grid, the falling and buffered pieces, and
/// the score/level bookkeeping. The session is the sole mutator of both
/// grid and pieces; the shell drives it through `on_tick`/`on_command`
/// and reads everything else back through the accessor methods.
pub struct Session {
    grid: Grid,
    piece: Piece,
    next_piece: Piece,
    level: u32,
    lines: u64,
    score: u64,
    game_over: bool,
    source: Box<dyn ShapeSource>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomShapes))
    }

    pub fn with_source(mut source: Box<dyn ShapeSource>) -> Self {
        let piece = Piece::new(source.next_shape(), SPAWN_LOCATION);
        let next_piece = Piece::new(source.next_shape(), SPAWN_LOCATION);
        Self {
            grid: Grid::new(),
            piece,
            next_piece,
            level: 1,
            lines: 0,
            score: 0,
            game_over: false,
            source,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Interval the shell should schedule gravity ticks at. Shrinks with
    /// each level down to the fixed floor.
    pub fn tick_interval(&self) -> Duration {
        let secs = (BASE_INTERVAL_SECS - f64::from(self.level) * LEVEL_SPEEDUP_SECS)
            .max(MIN_INTERVAL_SECS);
        Duration::from_secs_f64(secs)
    }

    /// Whether the current piece overlaps a wall, the floor, or a locked
    /// cell. Rows above the visible board never count as invalid.
    pub fn is_invalid(&self) -> bool {
        self.placement_invalid(&self.piece)
    }

    fn placement_invalid(&self, piece: &Piece) -> bool {
        for location in piece.grid_locations() {
            if location.row < 0 {
                return true;
            }
            if location.column < 0 {
                return true;
            }
            if location.column >= COLUMNS as i32 {
                return true;
            }
            // Bounds first, so we never index off the grid; above the top
            // edge is tolerated while a piece spawns or rotates up there.
            if (location.row as usize) < ROWS
                && self.grid.cell(location.row as usize, location.column as usize) == Cell::Block
            {
                return true;
            }
        }
        false
    }

    /// One gravity step. If the piece cannot descend it locks in place,
    /// the buffered piece takes over, and full lines are cleared; a
    /// replacement that has no room latches game over instead.
    pub fn on_tick(&mut self) {
        if self.game_over {
            return;
        }
        self.piece.move_down();
        if !self.is_invalid() {
            return;
        }
        self.piece.move_up();
        self.lock_piece();
        self.advance_pieces();
        if self.is_invalid() {
            self.game_over = true;
            return;
        }
        self.check_lines();
    }

    /// Applies a player command optimistically and rolls it back with the
    /// exact inverse if it leaves the piece somewhere invalid.
    pub fn on_command(&mut self, command: Command) {
        if self.game_over {
            return;
        }
        match command {
            Command::MoveLeft => {
                self.piece.move_left();
                if self.is_invalid() {
                    self.piece.move_right();
                }
            }
            Command::MoveRight => {
                self.piece.move_right();
                if self.is_invalid() {
                    self.piece.move_left();
                }
            }
            Command::RotateRight => {
                self.piece.rotate_right();
                if self.is_invalid() {
                    self.piece.rotate_left();
                }
            }
            Command::RotateLeft => {
                self.piece.rotate_left();
                if self.is_invalid() {
                    self.piece.rotate_right();
                }
            }
            // Descend to the lowest valid row; locking waits for the next
            // scheduled tick.
            Command::HardDrop => loop {
                self.piece.move_down();
                if self.is_invalid() {
                    self.piece.move_up();
                    break;
                }
            },
        }
    }

    /// Where the current piece would come to rest if dropped now. Used by
    /// the renderer for the ghost outline; never mutates the session.
    pub fn drop_target(&self) -> Piece {
        let mut ghost = self.piece.clone();
        loop {
            ghost.move_down();
            if self.placement_invalid(&ghost) {
                ghost.move_up();
                return ghost;
            }
        }
    }

    fn lock_piece(&mut self) {
        for location in self.piece.grid_locations() {
            // Cells that rest above the board are dropped, not an error.
            if location.row >= 0 && (location.row as usize) < ROWS {
                self.grid
                    .set(location.row as usize, location.column as usize, Cell::Block);
            }
        }
    }

    fn advance_pieces(&mut self) {
        let fresh = Piece::new(self.source.next_shape(), SPAWN_LOCATION);
        self.piece = std::mem::replace(&mut self.next_piece, fresh);
    }

    fn check_lines(&mut self) {
        let full_rows: Vec<usize> = (0..ROWS).filter(|row| self.grid.is_full(*row)).collect();
        let cleared = full_rows.len() as u64;
        if cleared == 0 {
            return;
        }
        // Clear from the top down so the remaining indices stay valid.
        for row in full_rows.into_iter().rev() {
            self.grid.clear_row(row);
        }
        self.lines += cleared;
        self.score += SCORING[cleared as usize] * u64::from(self.level);
        self.level = (self.lines / LINES_PER_LEVEL) as u32 + 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
