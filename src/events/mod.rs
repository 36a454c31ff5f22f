//! Event and message types used by the transform subsystem.
//!
//! Relation changes are observer events triggered on the world; visibility
//! updates and chat notices are buffered messages read once per tick by their
//! collaborators.
//!
//! Submodules:
//! - [`notice`] – chat notice addressed to a player-like object
//! - [`relation`] – parent/sticky change event and the notice observer
//! - [`visibility`] – position-changed message for the broadcast layer
pub mod notice;
pub mod relation;
pub mod visibility;
