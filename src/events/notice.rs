//! Chat notice message.
//!
//! Human-readable text addressed to a single player-like object. The transform
//! code only produces these; delivering them to a client belongs to the chat
//! layer that reads `Messages<ChatNotice>`.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

/// A line of chat text for `recipient`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ChatNotice {
    pub recipient: Entity,
    pub text: String,
}
