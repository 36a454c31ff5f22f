//! ECS resources made available to systems.
//!
//! Overview
//! - `transformconfig` – INI-backed defaults and notice toggle
//! - `visibility` – per-tick collection of moved objects and message registration
pub mod transformconfig;
pub mod visibility;
