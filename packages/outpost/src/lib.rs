//! Client-side GUI layer for the outpost real-time-strategy game.
//!
//! This crate is the windowed front end: it renders a scrollable
//! battlefield view, overlays unit and selection graphics, and presents the
//! settings menu, driven by input events and a connection to a game server.
//! The simulation itself, the wire protocol semantics, and the GPU backend
//! are external collaborators reached through the interfaces in `net` and
//! `graphics`.

#[macro_use]
extern crate tracing;


pub mod game;
pub mod gui;
pub mod net;
pub mod player;
pub mod settings;
