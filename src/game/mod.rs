pub mod board;
pub mod piece;
pub mod session;

pub use board::{Cell, Grid};
pub use piece::{
    random_shape, Frame, Location, Piece, RandomShapes, SequenceShapes, Shape, ShapeKind,
    ShapeSource, SPAWN_LOCATION,
};
pub use session::{Command, Session};
