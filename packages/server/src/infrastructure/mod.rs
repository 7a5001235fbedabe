//! Infrastructure layer: concrete implementations of the domain traits and
//! the wire-format DTOs.

pub mod dto;
pub mod pusher;
pub mod registry;
pub mod stt;
pub mod translation;
