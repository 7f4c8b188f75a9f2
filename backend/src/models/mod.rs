//! Domain models for the credit exchange game

pub mod event;
pub mod player;
pub mod round;
pub mod state;
