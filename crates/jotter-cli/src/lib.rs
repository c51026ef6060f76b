//! jot - terminal front end for the jotter note form
//!
//! The binary wires configuration, logging and the shared notes cache
//! together, then hands off to one of the [`commands`].

pub mod app;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
