//! Transformkit demo entry point.
//!
//! A headless simulation that exercises the transform subsystem:
//! - a ship owning an attached lantern and a helm child
//! - a character riding the ship through a sticky link
//!
//! Each tick the ship moves forward, gets finalized, and the objects reported
//! to the visibility layer are logged together with the rider's location.
//!
//! # Running
//!
//! ```sh
//! cargo run -- --ticks 5 --dump-spawn
//! RUST_LOG=debug cargo run
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec3;
use log::{error, info, warn};

use transformkit::components::gameobject::{AttachedObjects, GameObject, ObjectKind};
use transformkit::components::transform::Transform;
use transformkit::events::relation::relation_notice_observer;
use transformkit::resources::transformconfig::TransformConfig;
use transformkit::resources::visibility::{VisibleObjects, register_transform_messages};
use transformkit::systems::describe::{describe_transform, position_report};
use transformkit::systems::finalize::{
    finalize_pending_transforms, finalize_transform, request_finalize,
};
use transformkit::systems::hierarchy::{set_parent, set_sticky_parent};
use transformkit::systems::notice::{log_chat_notices, update_notice_messages};
use transformkit::systems::spawnposition::clone_as_spawn_position;
use transformkit::systems::visibility::{collect_visible_objects, update_position_messages};

/// Headless transform simulation
#[derive(Parser)]
#[command(version, about = "Moves a ship with a sticky rider and logs what the visibility layer sees.")]
struct Cli {
    /// Configuration file (default: ./transform.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to simulate. Overrides the configuration file.
    #[arg(long, value_name = "N")]
    ticks: Option<u32>,

    /// Print the rider's final spawn record as JSON.
    #[arg(long)]
    dump_spawn: bool,
}

fn placed(config: &TransformConfig, position: Vec3) -> Transform {
    let mut transform = config.new_transform();
    transform.local.set_position(position);
    transform
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => TransformConfig::with_path(path),
        None => TransformConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }
    let ticks = cli.ticks.unwrap_or(config.ticks);
    let step = config.step;

    let mut world = World::new();
    register_transform_messages(&mut world);
    world.insert_resource(config.clone());
    world.add_observer(relation_notice_observer);
    world.flush();

    // --------------- Scene ---------------
    let lantern = world
        .spawn((
            placed(&config, Vec3::new(100.0, 50.0, 12.0)),
            GameObject::new(101, "Mast Lantern", ObjectKind::Doodad),
        ))
        .id();
    let ship = world
        .spawn((
            placed(&config, Vec3::new(100.0, 50.0, 0.0)),
            GameObject::new(100, "Clipper", ObjectKind::Slave),
            AttachedObjects::default().with_doodad(lantern),
        ))
        .id();
    let helm = world
        .spawn((
            placed(&config, Vec3::new(96.0, 50.0, 2.0)),
            GameObject::new(102, "Helm", ObjectKind::Doodad),
        ))
        .id();
    let rider = world
        .spawn((
            placed(&config, Vec3::new(103.0, 51.0, 1.0)),
            GameObject::character(1, "Aria"),
        ))
        .id();

    for child in [lantern, helm] {
        if let Err(e) = set_parent(&mut world, child, Some(ship)) {
            error!("Failed to attach {:?} to the ship: {}", child, e);
        }
    }
    if !set_sticky_parent(&mut world, rider, Some(ship)) {
        error!("Rider could not board the ship");
    }

    let mut update = Schedule::default();
    update.add_systems(
        (
            finalize_pending_transforms,
            collect_visible_objects,
            update_position_messages,
        )
            .chain(),
    );
    update.add_systems((log_chat_notices, update_notice_messages).chain());

    // Baseline for the first delta.
    finalize_transform(&mut world, ship, true);
    world.resource_mut::<VisibleObjects>().drain();

    // --------------- Main loop ---------------
    for tick in 1..=ticks {
        if let Some(mut transform) = world.get_mut::<Transform>(ship) {
            transform.local.translate(Vec3::new(step, 0.0, 0.0));
        }
        request_finalize(&mut world, ship);

        update.run(&mut world);

        let moved = world.resource_mut::<VisibleObjects>().drain();
        let names: Vec<String> = moved
            .iter()
            .filter_map(|e| world.get::<GameObject>(*e))
            .map(|obj| obj.to_string())
            .collect();
        info!("Tick {}: {} moved [{}]", tick, names.len(), names.join(", "));
        info!("Rider: {}", describe_transform(&world, rider, false));
    }

    if let Some(report) = position_report(&world, rider, None) {
        info!("{}", report);
    }

    if cli.dump_spawn {
        match clone_as_spawn_position(&world, rider).map(|spawn| spawn.to_json()) {
            Some(Ok(json)) => println!("{}", json),
            Some(Err(e)) => {
                eprintln!("Error serializing spawn position: {e}");
                std::process::exit(1);
            }
            None => {
                eprintln!("Error: rider has no transform");
                std::process::exit(1);
            }
        }
    }
}
