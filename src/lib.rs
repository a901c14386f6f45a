//! Game logic for Pairs, a memory-matching card game.
//!
//! Everything in this crate is free of GTK types so it can be driven and
//! tested without a display. The desktop front end lives in the binary.

pub mod config;
pub mod game;

pub const LOG_DOMAIN: &str = "pairs";
