//! # Sight Line
//!
//! `sightline` walks an observer's line of sight outward along a great
//! circle and reports where it first meets the terrain.

mod cancel;
mod error;
mod observer;
mod outcome;
mod state;
mod task;
pub mod walker;

pub use {
    crate::{
        cancel::CancelToken,
        error::SearchError,
        observer::{Observer, ObserverBuilder},
        outcome::SearchOutcome,
        task::{spawn, SearchHandle},
        walker::Walker,
    },
    elevation, geodesy,
};
