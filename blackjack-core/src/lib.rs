pub mod game;
pub mod prelude;
