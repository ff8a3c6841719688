pub mod config;
pub mod core;
pub mod display;
pub mod logic;
pub mod network;
pub mod scoring;
pub mod selector;


pub use crate::core::{Board, Move, PlayerId};
pub use scoring::{HttpScorer, Scorer};
pub use selector::{MoveSelector, SelectError};
