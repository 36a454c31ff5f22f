//! Transform systems and world operations.
//!
//! Most of this module is plain functions over `&mut World` that edit or
//! read the transform graph; the rest are schedule systems run once per tick.
//!
//! Submodules overview
//! - [`describe`] – human-readable location summaries
//! - [`finalize`] – per-tick movement commit and sticky delta propagation
//! - [`hierarchy`] – parent and sticky relation edits, despawn, deferred commands
//! - [`notice`] – chat notice logging and queue maintenance
//! - [`resolve`] – world-space resolution and parent chain helpers
//! - [`spawnposition`] – spawn record conversion and clone helpers
//! - [`visibility`] – collect moved objects and maintain the message queue

pub mod describe;
pub mod finalize;
pub mod hierarchy;
pub mod notice;
pub mod resolve;
pub mod spawnposition;
pub mod visibility;
