pub mod app;
pub mod config;
pub mod game;
pub mod ui;

pub use config::{COLUMNS, LINES_PER_LEVEL, ROWS, SCORING};
pub use game::{
    Cell, Command, Grid, Location, Piece, RandomShapes, SequenceShapes, Session, Shape, ShapeKind,
    ShapeSource, SPAWN_LOCATION,
};
