// Fixed game rules and shared UI constants.
pub const COLUMNS: usize = 10;
pub const ROWS: usize = 20;

// Points awarded for clearing n lines at once, indexed by n, times level.
pub const SCORING: [u64; 5] = [0, 10, 25, 75, 300];
pub const LINES_PER_LEVEL: u64 = 10;

// Gravity interval shrinks with level, floored at 0.1s from level 9 on.
pub const BASE_INTERVAL_SECS: f64 = 1.0;
pub const LEVEL_SPEEDUP_SECS: f64 = 0.1;
pub const MIN_INTERVAL_SECS: f64 = 0.1;

// Pieces enter two rows below the top edge, roughly centered.
pub const SPAWN_ROW: i32 = ROWS as i32 - 2;
pub const SPAWN_COLUMN: i32 = COLUMNS as i32 / 2 - 2;

pub const CELL_W: usize = 2; // render each block as two characters wide
pub const PLAY_W: usize = COLUMNS * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = ROWS + 2; // inner height plus ceiling/floor
// Minimal pane width to fit the playfield, sidebar and cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + 34;
