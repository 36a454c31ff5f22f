//! Integration tests for sticky (riding) links.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test sticky_integration
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec3;

use transformkit::components::gameobject::{GameObject, ObjectKind};
use transformkit::components::sticky::{StickyChildren, StickyParent};
use transformkit::components::transform::Transform;
use transformkit::events::notice::ChatNotice;
use transformkit::events::relation::{
    RelationChangedEvent, RelationKind, relation_notice_observer,
};
use transformkit::resources::visibility::register_transform_messages;
use transformkit::systems::hierarchy::{
    TransformCommands, attach_sticky_transform, despawn_transform, detach_sticky_transform,
    set_sticky_parent, sticky_children_of, sticky_parent_of,
};

fn host(world: &mut World, obj_id: u32) -> Entity {
    world
        .spawn((
            Transform::new().with_location(1, 10, 1),
            GameObject::new(obj_id, "Ship", ObjectKind::Slave),
        ))
        .id()
}

fn rider(world: &mut World, obj_id: u32) -> Entity {
    world
        .spawn((
            Transform::at(1.0, 2.0, 3.0).with_location(1, 11, 1),
            GameObject::character(obj_id, "Aria"),
        ))
        .id()
}

/// `c` rides `h` exactly when `h` lists `c`, for every pair.
fn assert_sticky_consistent(world: &mut World) {
    let mut query = world.query::<(Entity, Option<&StickyParent>, Option<&StickyChildren>)>();
    let rows: Vec<(Entity, Option<Entity>, Vec<Entity>)> = query
        .iter(world)
        .map(|(e, parent, riders)| {
            (
                e,
                parent.map(StickyParent::get),
                riders.map(StickyChildren::to_vec).unwrap_or_default(),
            )
        })
        .collect();
    for (entity, parent, riders) in &rows {
        if let Some(parent) = parent {
            assert!(
                sticky_children_of(world, *parent).contains(entity),
                "{:?} points at {:?} but is not listed there",
                entity,
                parent
            );
        }
        for r in riders {
            assert_eq!(sticky_parent_of(world, *r), Some(*entity));
        }
    }
}

#[derive(Resource, Default)]
struct SeenRelations(Vec<RelationChangedEvent>);

fn record_relations(trigger: On<RelationChangedEvent>, mut seen: ResMut<SeenRelations>) {
    seen.0.push(*trigger.event());
}

// =============================================================================
// attach / detach
// =============================================================================

#[test]
fn attach_links_both_sides_without_moving() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);

    assert!(attach_sticky_transform(&mut world, ship, walker));

    assert_eq!(sticky_parent_of(&world, walker), Some(ship));
    assert_eq!(sticky_children_of(&world, ship), vec![walker]);
    assert_eq!(
        world.get::<Transform>(walker).unwrap().local.position(),
        Vec3::new(1.0, 2.0, 3.0)
    );
}

#[test]
fn attach_rejects_cross_instance_links() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = world
        .spawn((
            Transform::new().with_location(1, 10, 2),
            GameObject::character(1, "Aria"),
        ))
        .id();

    assert!(!attach_sticky_transform(&mut world, ship, walker));

    assert!(sticky_parent_of(&world, walker).is_none());
    assert!(world.get::<StickyChildren>(ship).is_none());
}

#[test]
fn attach_rejects_cross_world_links() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = world
        .spawn((
            Transform::new().with_location(2, 10, 1),
            GameObject::character(1, "Aria"),
        ))
        .id();

    assert!(!attach_sticky_transform(&mut world, ship, walker));
    assert!(sticky_parent_of(&world, walker).is_none());
}

#[test]
fn attach_rejects_ownerless_missing_and_self() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let ownerless = world.spawn(Transform::new().with_location(1, 10, 1)).id();
    let bare = world.spawn_empty().id();
    let gone = rider(&mut world, 2);
    world.despawn(gone);

    assert!(!attach_sticky_transform(&mut world, ship, ownerless));
    assert!(!attach_sticky_transform(&mut world, ship, bare));
    assert!(!attach_sticky_transform(&mut world, ship, gone));
    assert!(!attach_sticky_transform(&mut world, ship, ship));
    assert!(sticky_children_of(&world, ship).is_empty());
}

#[test]
fn attach_twice_fails_second_time() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);

    assert!(attach_sticky_transform(&mut world, ship, walker));
    assert!(!attach_sticky_transform(&mut world, ship, walker));
    assert_eq!(sticky_children_of(&world, ship), vec![walker]);
}

#[test]
fn attach_to_new_host_releases_old_host() {
    let mut world = World::new();
    let ship_a = host(&mut world, 100);
    let ship_b = host(&mut world, 101);
    let walker = rider(&mut world, 1);

    assert!(attach_sticky_transform(&mut world, ship_a, walker));
    assert!(attach_sticky_transform(&mut world, ship_b, walker));

    assert!(sticky_children_of(&world, ship_a).is_empty());
    assert_eq!(sticky_children_of(&world, ship_b), vec![walker]);
    assert_sticky_consistent(&mut world);
}

#[test]
fn detach_clears_back_pointer_even_when_not_listed() {
    let mut world = World::new();
    let ship_a = host(&mut world, 100);
    let ship_b = host(&mut world, 101);
    let walker = rider(&mut world, 1);
    assert!(attach_sticky_transform(&mut world, ship_a, walker));

    // walker is not listed on ship_b.
    detach_sticky_transform(&mut world, ship_b, walker);

    assert!(sticky_parent_of(&world, walker).is_none());
    assert!(sticky_children_of(&world, ship_a).is_empty());
    assert_sticky_consistent(&mut world);
}

#[test]
fn detach_of_unlinked_pair_is_noop() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);

    detach_sticky_transform(&mut world, ship, walker);

    assert!(sticky_parent_of(&world, walker).is_none());
    assert!(world.get::<StickyChildren>(ship).is_none());
}

#[test]
fn consistency_holds_after_mixed_operations() {
    let mut world = World::new();
    let ship_a = host(&mut world, 100);
    let ship_b = host(&mut world, 101);
    let riders: Vec<Entity> = (1..=4).map(|id| rider(&mut world, id)).collect();

    assert!(attach_sticky_transform(&mut world, ship_a, riders[0]));
    assert!(attach_sticky_transform(&mut world, ship_a, riders[1]));
    assert!(set_sticky_parent(&mut world, riders[2], Some(ship_b)));
    assert!(set_sticky_parent(&mut world, riders[1], Some(ship_b)));
    detach_sticky_transform(&mut world, ship_a, riders[0]);
    assert!(set_sticky_parent(&mut world, riders[3], Some(ship_a)));
    assert!(set_sticky_parent(&mut world, riders[2], None));

    assert_sticky_consistent(&mut world);
    assert_eq!(sticky_children_of(&world, ship_a), vec![riders[3]]);
    assert_eq!(sticky_children_of(&world, ship_b), vec![riders[1]]);
}

// =============================================================================
// set_sticky_parent
// =============================================================================

#[test]
fn set_sticky_parent_switches_hosts() {
    let mut world = World::new();
    let ship_a = host(&mut world, 100);
    let ship_b = host(&mut world, 101);
    let walker = rider(&mut world, 1);

    assert!(set_sticky_parent(&mut world, walker, Some(ship_a)));
    assert!(set_sticky_parent(&mut world, walker, Some(ship_a)));
    assert!(set_sticky_parent(&mut world, walker, Some(ship_b)));

    assert_eq!(sticky_parent_of(&world, walker), Some(ship_b));
    assert!(sticky_children_of(&world, ship_a).is_empty());
    assert!(set_sticky_parent(&mut world, walker, None));
    assert!(sticky_children_of(&world, ship_b).is_empty());
}

#[test]
fn rejected_set_sticky_parent_still_releases_old_host() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let elsewhere = world
        .spawn((
            Transform::new().with_location(1, 10, 5),
            GameObject::new(200, "Raft", ObjectKind::Slave),
        ))
        .id();
    let walker = rider(&mut world, 1);
    assert!(set_sticky_parent(&mut world, walker, Some(ship)));

    assert!(!set_sticky_parent(&mut world, walker, Some(elsewhere)));

    assert!(sticky_parent_of(&world, walker).is_none());
    assert!(sticky_children_of(&world, ship).is_empty());
}

#[test]
fn sticky_changes_trigger_events_for_characters() {
    let mut world = World::new();
    world.init_resource::<SeenRelations>();
    world.add_observer(record_relations);
    world.flush();

    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);
    let crate_box = world
        .spawn((
            Transform::new().with_location(1, 10, 1),
            GameObject::new(300, "Crate", ObjectKind::Doodad),
        ))
        .id();

    assert!(set_sticky_parent(&mut world, walker, Some(ship)));
    assert!(set_sticky_parent(&mut world, walker, Some(ship)));
    assert!(set_sticky_parent(&mut world, crate_box, Some(ship)));
    assert!(set_sticky_parent(&mut world, walker, None));

    let seen = &world.resource::<SeenRelations>().0;
    assert_eq!(
        seen.as_slice(),
        &[
            RelationChangedEvent {
                entity: walker,
                kind: RelationKind::Sticky,
                old: None,
                new: Some(ship),
            },
            RelationChangedEvent {
                entity: walker,
                kind: RelationKind::Sticky,
                old: Some(ship),
                new: None,
            },
        ]
    );
}

#[test]
fn sticky_notice_text() {
    let mut world = World::new();
    register_transform_messages(&mut world);
    world.add_observer(relation_notice_observer);
    world.flush();

    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);
    assert!(set_sticky_parent(&mut world, walker, Some(ship)));

    let mut state: SystemState<MessageReader<ChatNotice>> = SystemState::new(&mut world);
    let mut reader = state.get_mut(&mut world);
    let notices: Vec<ChatNotice> = reader.read().cloned().collect();
    assert_eq!(
        notices,
        vec![ChatNotice {
            recipient: walker,
            text: "|cFFFF88FFChanging Sticky - <null> => Ship (100)|r".to_string(),
        }]
    );
}

// =============================================================================
// despawn and commands
// =============================================================================

#[test]
fn despawning_host_releases_riders() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let a = rider(&mut world, 1);
    let b = rider(&mut world, 2);
    assert!(attach_sticky_transform(&mut world, ship, a));
    assert!(attach_sticky_transform(&mut world, ship, b));

    assert!(despawn_transform(&mut world, ship));

    assert!(sticky_parent_of(&world, a).is_none());
    assert!(sticky_parent_of(&world, b).is_none());
    assert_sticky_consistent(&mut world);
}

#[test]
fn despawning_rider_unlists_it() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let a = rider(&mut world, 1);
    let b = rider(&mut world, 2);
    assert!(attach_sticky_transform(&mut world, ship, a));
    assert!(attach_sticky_transform(&mut world, ship, b));

    assert!(despawn_transform(&mut world, a));

    assert_eq!(sticky_children_of(&world, ship), vec![b]);
}

#[test]
fn commands_queue_sticky_changes() {
    let mut world = World::new();
    let ship = host(&mut world, 100);
    let walker = rider(&mut world, 1);

    let mut state: SystemState<Commands> = SystemState::new(&mut world);
    {
        let mut commands = state.get_mut(&mut world);
        commands.cmd_set_sticky_parent(walker, Some(ship));
    }
    state.apply(&mut world);
    assert_eq!(sticky_parent_of(&world, walker), Some(ship));

    {
        let mut commands = state.get_mut(&mut world);
        commands.cmd_set_sticky_parent(walker, None);
    }
    state.apply(&mut world);
    assert!(sticky_parent_of(&world, walker).is_none());
    assert!(world.get::<StickyChildren>(ship).is_none());
}
