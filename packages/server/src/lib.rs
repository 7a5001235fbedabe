//! Live caption broadcast server library.
//!
//! Coordinates broadcast rooms: one broadcaster streams microphone audio,
//! zero or more viewers receive captions derived from that audio through an
//! external speech-to-text session and an external translation call.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// settings
pub mod config;
