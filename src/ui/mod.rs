pub mod animations;
pub mod colors;
pub mod terminal;
