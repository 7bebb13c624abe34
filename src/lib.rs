//! Flappy Bird in the terminal, steered by a colored object in front of a webcam.
//!
//! [`vision`] turns camera frames into a normalized vertical position on its
//! own thread; [`game`] consumes that position at a fixed tick rate and
//! [`render`] draws the result with half-block pixels.

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod tuner;
pub mod vision;

pub use error::{Error, Result};
