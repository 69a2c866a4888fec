pub mod animations;
pub mod demo;
