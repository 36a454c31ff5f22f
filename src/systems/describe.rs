//! Human-readable location summaries for logs and chat commands.
//!
//! `chat_formatted` output uses the client's `|cAARRGGBB … |r` colour codes:
//! white for ids and coordinates, green for parent names, yellow for sticky
//! host names.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::components::gameobject::GameObject;
use crate::components::transform::Transform;
use crate::systems::hierarchy::sticky_parent_of;
use crate::systems::resolve::{resolve_world, transform_parent};

const COLOR_WHITE: &str = "|cFFFFFFFF";
const COLOR_GREEN: &str = "|cFF00FF00";
const COLOR_YELLOW: &str = "|cFFFFFF00";
const COLOR_RESTORE: &str = "|r";

struct Palette {
    white: &'static str,
    green: &'static str,
    yellow: &'static str,
    restore: &'static str,
    line_feed: &'static str,
}

impl Palette {
    fn new(chat_formatted: bool) -> Self {
        if chat_formatted {
            Self {
                white: COLOR_WHITE,
                green: COLOR_GREEN,
                yellow: COLOR_YELLOW,
                restore: COLOR_RESTORE,
                line_feed: "\n",
            }
        } else {
            Self {
                white: "",
                green: "",
                yellow: "",
                restore: "",
                line_feed: "",
            }
        }
    }
}

/// Describe the local value of `entity` and the chain of objects it hangs from.
///
/// When the node is attached to anything, the line starts with its resolved
/// world value in brackets. Each parent adds an `on ( … )` group and a sticky
/// host a `sticking to ( … )` group, both naming the related object and its
/// `#obj_id` when it has owner data. Returns an empty string for entities
/// without a [`Transform`].
pub fn describe_transform(world: &World, entity: Entity, chat_formatted: bool) -> String {
    let palette = Palette::new(chat_formatted);
    let mut seen = FxHashSet::default();
    describe_node(world, entity, true, &palette, &mut seen)
}

fn describe_node(
    world: &World,
    entity: Entity,
    first: bool,
    palette: &Palette,
    seen: &mut FxHashSet<Entity>,
) -> String {
    let Some(transform) = world.get::<Transform>(entity) else {
        return String::new();
    };
    // Sticky links may form loops.
    if !seen.insert(entity) {
        return String::new();
    }
    let parent = transform_parent(world, entity);
    let sticky_host = sticky_parent_of(world, entity);

    let mut out = String::new();
    if first
        && (parent.is_some() || sticky_host.is_some())
        && let Some(resolved) = resolve_world(world, entity)
    {
        out.push_str(&format!(
            "[{}{}{}] {}=> ",
            palette.white, resolved, palette.restore, palette.line_feed
        ));
    }
    out.push_str(&transform.local.to_string());

    if let Some(parent) = parent {
        out.push_str("\n on ( ");
        out.push_str(&object_tag(world, parent, palette.green, palette));
        out.push_str(&describe_node(world, parent, false, palette, seen));
        out.push_str(" )");
        out.push_str(palette.line_feed);
    }

    if let Some(host) = sticky_host {
        out.push_str("\n sticking to ( ");
        out.push_str(&object_tag(world, host, palette.yellow, palette));
        out.push_str(&describe_node(world, host, false, palette, seen));
        out.push_str(" )");
        out.push_str(palette.line_feed);
    }
    out
}

fn object_tag(world: &World, entity: Entity, name_color: &str, palette: &Palette) -> String {
    let Some(obj) = world.get::<GameObject>(entity) else {
        return String::new();
    };
    let mut tag = String::new();
    if !obj.name.is_empty() {
        tag.push_str(&format!("{}{}{} ", name_color, obj.name, palette.restore));
    }
    tag.push_str(&format!(
        "#{}{}{} ",
        palette.white, obj.obj_id, palette.restore
    ));
    tag
}

/// One-line chat report of an object's world position.
///
/// `zone_name` is shown after the zone id, `???` when unknown. Returns `None`
/// for entities without a [`Transform`] or [`GameObject`].
pub fn position_report(world: &World, entity: Entity, zone_name: Option<&str>) -> Option<String> {
    let obj = world.get::<GameObject>(entity)?;
    let transform = world.get::<Transform>(entity)?;
    let resolved = resolve_world(world, entity)?;
    Some(format!(
        "[Position] {w}{}{r} (ObjId:{}) X: {w}{:.1}{r}  Y: {w}{:.1}{r}  Z: {w}{:.1}{r}  RotZ: {w}{:.0}{r}  ZoneId: {w}{}{r} {}",
        obj.name,
        obj.obj_id,
        resolved.x(),
        resolved.y(),
        resolved.z(),
        resolved.yaw(),
        transform.zone_id,
        zone_name.unwrap_or("???"),
        w = COLOR_WHITE,
        r = COLOR_RESTORE,
    ))
}
