//! Event types and observers.
//!
//! Events decouple the frame systems from one-off reactions.
//!
//! Submodules:
//! - [`character`] – the character model finished loading; install its clips
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod character;
pub mod switchdebug;
