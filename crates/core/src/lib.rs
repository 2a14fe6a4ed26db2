#![forbid(unsafe_code)]

pub mod flashcards;
pub mod model;
pub mod quiz;
pub mod random;
pub mod time;

pub use random::RandomSource;
pub use time::Clock;
