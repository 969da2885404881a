//! Startup failures
//!
//! Gameplay has no error paths (winning and losing are phases, not faults).
//! Everything here aborts initialization and is reported to the player.

use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    NoWindow,
    NoDocument,
    MissingElement { id: String },
    NotACanvas { id: String },
    Surface(String),
    Adapter(String),
    Device(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no browser window available"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingElement { id } => write!(f, "element #{id} not found"),
            Self::NotACanvas { id } => write!(f, "element #{id} is not a canvas"),
            Self::Surface(msg) => write!(f, "failed to create render surface: {msg}"),
            Self::Adapter(msg) => write!(f, "no suitable graphics adapter: {msg}"),
            Self::Device(msg) => write!(f, "failed to create graphics device: {msg}"),
        }
    }
}

impl std::error::Error for InitError {}
