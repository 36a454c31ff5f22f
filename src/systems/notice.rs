//! Chat notice delivery for the headless build.
//!
//! Without a client connection, notices are written to the log under the
//! recipient's name.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::gameobject::GameObject;
use crate::events::notice::ChatNotice;

/// Log every [`ChatNotice`] written since this system last ran.
pub fn log_chat_notices(mut reader: MessageReader<ChatNotice>, objects: Query<&GameObject>) {
    for notice in reader.read() {
        match objects.get(notice.recipient) {
            Ok(obj) => info!("[chat -> {}] {}", obj, notice.text),
            Err(_) => info!("[chat -> {:?}] {}", notice.recipient, notice.text),
        }
    }
}

/// Advance the ECS message queue for [`ChatNotice`].
pub fn update_notice_messages(mut msgs: ResMut<Messages<ChatNotice>>) {
    msgs.update();
}
