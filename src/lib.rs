//! Glitchline: Alternate-Timeline Landmark Imagery
//!
//! A small orchestration service that turns a year, theme, and glitch
//! intensity into a generated alternate-history narrative plus three
//! AI-generated landmark images for Buffalo, NY.

pub mod catalog;
pub mod config;
pub mod error;
pub mod glitch;
pub mod logging;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod world;
