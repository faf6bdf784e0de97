use std::fmt;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::config::{SPAWN_COLUMN, SPAWN_ROW};
use crate::game::Cell;

/// Board-relative coordinates. Row 0 is the bottom of the playfield.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Location {
    pub row: i32,
    pub column: i32,
}

impl Location {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }
}

/// Anchor every freshly spawned piece starts from.
pub const SPAWN_LOCATION: Location = Location::new(SPAWN_ROW, SPAWN_COLUMN);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeKind {
    I,
    O,
    J,
    L,
    S,
    T,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    pub fn shape(self) -> &'static Shape {
        match self {
            ShapeKind::I => &I_SHAPE,
            ShapeKind::O => &O_SHAPE,
            ShapeKind::J => &J_SHAPE,
            ShapeKind::L => &L_SHAPE,
            ShapeKind::S => &S_SHAPE,
            ShapeKind::T => &T_SHAPE,
            ShapeKind::Z => &Z_SHAPE,
        }
    }
}

/// One rotation state, a small square occupancy matrix. Frame row 0 is the
/// bottom of the piece, matching the board's row direction.
pub type Frame = &'static [&'static [Cell]];

/// Immutable catalog entry: rotation frames plus a fixed display color.
pub struct Shape {
    pub kind: ShapeKind,
    pub frames: &'static [Frame],
    pub color: (u8, u8, u8),
}

const E: Cell = Cell::Empty;
const B: Cell = Cell::Block;

static I_SHAPE: Shape = Shape {
    kind: ShapeKind::I,
    frames: &[
        &[
            &[E, E, E, E],
            &[E, E, E, E],
            &[B, B, B, B],
            &[E, E, E, E],
        ],
        &[
            &[E, E, B, E],
            &[E, E, B, E],
            &[E, E, B, E],
            &[E, E, B, E],
        ],
    ],
    color: (255, 191, 0), // amber
};

static O_SHAPE: Shape = Shape {
    kind: ShapeKind::O,
    frames: &[&[
        &[E, E, E, E],
        &[E, B, B, E],
        &[E, B, B, E],
        &[E, E, E, E],
    ]],
    color: (255, 0, 0), // red
};

static J_SHAPE: Shape = Shape {
    kind: ShapeKind::J,
    frames: &[
        &[&[E, E, E], &[B, B, B], &[E, E, B]],
        &[&[E, B, E], &[E, B, E], &[B, B, E]],
        &[&[B, E, E], &[B, B, B], &[E, E, E]],
        &[&[E, B, B], &[E, B, E], &[E, B, E]],
    ],
    color: (239, 222, 205), // almond
};

static L_SHAPE: Shape = Shape {
    kind: ShapeKind::L,
    frames: &[
        &[&[E, E, E], &[B, B, B], &[B, E, E]],
        &[&[B, B, E], &[E, B, E], &[E, B, E]],
        &[&[E, E, B], &[B, B, B], &[E, E, E]],
        &[&[E, B, E], &[E, B, E], &[E, B, B]],
    ],
    color: (63, 0, 255), // indigo
};

static S_SHAPE: Shape = Shape {
    kind: ShapeKind::S,
    frames: &[
        &[&[E, E, E], &[E, B, B], &[B, B, E]],
        &[&[E, B, E], &[E, B, B], &[E, E, B]],
    ],
    color: (0, 255, 255), // aqua
};

static T_SHAPE: Shape = Shape {
    kind: ShapeKind::T,
    frames: &[
        &[&[E, E, E], &[B, B, B], &[E, B, E]],
        &[&[E, B, E], &[B, B, E], &[E, B, E]],
        &[&[E, B, E], &[B, B, B], &[E, E, E]],
        &[&[E, B, E], &[E, B, B], &[E, B, E]],
    ],
    color: (68, 215, 168), // eucalyptus
};

static Z_SHAPE: Shape = Shape {
    kind: ShapeKind::Z,
    frames: &[
        &[&[E, E, E], &[B, B, E], &[E, B, B]],
        &[&[E, E, B], &[E, B, B], &[E, B, E]],
    ],
    color: (128, 128, 128), // gray
};

/// A shape instance on the board: catalog entry, rotation frame, anchor.
///
/// A piece knows nothing about the grid and cannot collide by itself;
/// every mutator is reversible by its inverse so the session can roll an
/// invalid move back.
#[derive(Clone)]
pub struct Piece {
    shape: &'static Shape,
    frame_index: usize,
    location: Location,
}

impl Piece {
    pub fn new(kind: ShapeKind, location: Location) -> Self {
        Self {
            shape: kind.shape(),
            frame_index: 0,
            location,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind
    }

    pub fn color(&self) -> (u8, u8, u8) {
        self.shape.color
    }

    pub fn frame(&self) -> Frame {
        self.shape.frames[self.frame_index]
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn rotate_right(&mut self) {
        self.frame_index = (self.frame_index + 1) % self.shape.frames.len();
    }

    pub fn rotate_left(&mut self) {
        let count = self.shape.frames.len();
        self.frame_index = (self.frame_index + count - 1) % count;
    }

    pub fn move_left(&mut self) {
        self.location.column -= 1;
    }

    pub fn move_right(&mut self) {
        self.location.column += 1;
    }

    pub fn move_down(&mut self) {
        self.location.row -= 1;
    }

    /// Undoes a `move_down`; not a gameplay action.
    pub fn move_up(&mut self) {
        self.location.row += 1;
    }

    /// Absolute board locations of every occupied cell in the current
    /// frame. Recomputed on demand; may extend above the visible board.
    pub fn grid_locations(&self) -> Vec<Location> {
        let mut locations = Vec::new();
        for (row, cells) in self.frame().iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                if *cell == Cell::Block {
                    locations.push(Location::new(
                        self.location.row + row as i32,
                        self.location.column + column as i32,
                    ));
                }
            }
        }
        locations
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.shape, other.shape)
            && self.frame_index == other.frame_index
            && self.location == other.location
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("kind", &self.shape.kind)
            .field("frame_index", &self.frame_index)
            .field("location", &self.location)
            .finish()
    }
}

pub fn random_shape() -> ShapeKind {
    let mut rng = thread_rng();
    *ShapeKind::ALL.choose(&mut rng).unwrap_or(&ShapeKind::I)
}

/// Supplies the kind of each freshly spawned piece. Play uses the
/// process-wide RNG; tests and scripted runs substitute a fixed sequence.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

pub struct RandomShapes;

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeKind {
        random_shape()
    }
}

/// Cycles through a fixed list of shapes.
pub struct SequenceShapes {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl SequenceShapes {
    pub fn new(shapes: Vec<ShapeKind>) -> Self {
        Self { shapes, index: 0 }
    }
}

impl ShapeSource for SequenceShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.index % self.shapes.len()];
        self.index += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_is_closed_per_shape() {
        for kind in ShapeKind::ALL {
            let mut piece = Piece::new(kind, SPAWN_LOCATION);
            let start = piece.clone();
            for _ in 0..kind.shape().frames.len() {
                piece.rotate_right();
            }
            assert_eq!(piece, start, "{kind:?} did not close under rotation");
        }
    }

    #[test]
    fn rotate_left_inverts_rotate_right() {
        for kind in ShapeKind::ALL {
            let mut piece = Piece::new(kind, SPAWN_LOCATION);
            let start = piece.clone();
            piece.rotate_right();
            piece.rotate_left();
            assert_eq!(piece, start);

            // And wrapping the other way around zero.
            piece.rotate_left();
            piece.rotate_right();
            assert_eq!(piece, start);
        }
    }

    #[test]
    fn moves_invert_each_other() {
        let mut piece = Piece::new(ShapeKind::T, SPAWN_LOCATION);
        let start = piece.clone();

        piece.move_left();
        piece.move_right();
        assert_eq!(piece, start);

        piece.move_down();
        piece.move_up();
        assert_eq!(piece, start);
    }

    #[test]
    fn o_piece_grid_locations_at_spawn() {
        let piece = Piece::new(ShapeKind::O, Location::new(18, 3));
        let mut locations = piece.grid_locations();
        locations.sort_by_key(|l| (l.row, l.column));
        assert_eq!(
            locations,
            vec![
                Location::new(19, 4),
                Location::new(19, 5),
                Location::new(20, 4),
                Location::new(20, 5),
            ]
        );
    }

    #[test]
    fn every_frame_has_four_blocks() {
        for kind in ShapeKind::ALL {
            for frame in kind.shape().frames {
                let blocks: usize = frame
                    .iter()
                    .map(|row| row.iter().filter(|c| **c == Cell::Block).count())
                    .sum();
                assert_eq!(blocks, 4, "{kind:?} frame is not a tetromino");
            }
        }
    }

    #[test]
    fn sequence_source_cycles() {
        let mut source = SequenceShapes::new(vec![ShapeKind::I, ShapeKind::O]);
        assert_eq!(source.next_shape(), ShapeKind::I);
        assert_eq!(source.next_shape(), ShapeKind::O);
        assert_eq!(source.next_shape(), ShapeKind::I);
    }

    #[test]
    fn random_shape_covers_catalog() {
        let mut seen = [false; 7];
        for _ in 0..1000 {
            let kind = random_shape();
            seen[ShapeKind::ALL.iter().position(|k| *k == kind).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
