//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, rendering
//! handles, asset stores, and configuration.
//!
//! Overview
//! - `characterasset` – load state of the character model and its loader thread
//! - `charactermodel` – GPU model, baked clips and blended pose upload (NonSend)
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – window, movement, animation and asset settings
//! - `gltfmanifest` – glTF/GLB inspection used by the loader thread
//! - `input` – per-frame keyboard state of the direction keys
//! - `rendertarget` – fixed-resolution off-screen surface (NonSend)
//! - `screensize` – logical composite dimensions in pixels
//! - `texturestore` – loaded background textures keyed by name
//! - `viewport` – 3D camera and its render target (NonSend)
//! - `windowsize` – actual window dimensions, for letterboxing
//! - `worldtime` – simulation time and delta
pub mod characterasset;
pub mod charactermodel;
pub mod debugmode;
pub mod gameconfig;
pub mod gltfmanifest;
pub mod input;
pub mod rendertarget;
pub mod screensize;
pub mod texturestore;
pub mod viewport;
pub mod windowsize;
pub mod worldtime;
