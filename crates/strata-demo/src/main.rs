//! Headless demo host that drives the world model end to end.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p strata-demo` for a full cycle: object type
//! registration, wire-format chunk loading, visibility culling, a light
//! propagation pass, and light removal.
//! Run with `cargo run -p strata-demo -- --max-light-radius 6` to override
//! the queue sizing.

use std::path::PathBuf;

use clap::Parser;
use strata_config::{CliArgs, Config};
use strata_lighting::{LightEngine, LightItem};
use strata_world::{CHUNK_SIZE, Cell, Chunk, World, visible_count};
use tracing::info;

const STONE: u16 = 1;
const GLASS: u16 = 2;
const LAMP: u16 = 3;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("strata"))
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    strata_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    if let Err(e) = run(&config) {
        eprintln!("demo failed: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = World::new();

    // Object type setup, as the host's configuration phase would do it.
    world.set_object_type(STONE, false, true, true, false, [0.0, 0.0, 0.25, 0.25])?;
    world.set_object_type(GLASS, true, true, true, false, [0.25, 0.0, 0.5, 0.25])?;
    world.set_object_type(LAMP, true, false, true, true, [0.5, 0.0, 0.75, 0.25])?;
    world.set_object_model(LAMP, 2, &[STONE as u32; 8])?;

    world.set_chunk_changed_hook(Some(Box::new(|x, y, z| {
        info!("chunk changed: ({x}, {y}, {z})");
    })));
    world.set_active_cell_changed_hook(Some(Box::new(|x, y, z, type_id, extra| {
        info!("active cell changed: ({x}, {y}, {z}) type {type_id} extra {extra:?}");
    })));

    // A stone floor chunk, delivered through the wire codec the way a
    // network peer would hand it over.
    let mut template = Chunk::new(0, 0, 0);
    for z in 0..CHUNK_SIZE {
        for x in 0..CHUNK_SIZE {
            for y in 0..4 {
                template.set_cell(
                    x,
                    y,
                    z,
                    Cell {
                        type_id: STONE,
                        ..Cell::default()
                    },
                )?;
            }
        }
    }
    let wire = template.encode_cells();
    for cx in -1..=1 {
        for cz in -1..=1 {
            world.load_chunk_data(cx, 0, cz, &wire)?;
        }
    }

    if config.world.visibility_on_load {
        for cx in -1..=1 {
            for cz in -1..=1 {
                world.compute_chunk_visibility(cx, 0, cz);
                if let Some(chunk) = world.index().get(cx, 0, cz) {
                    info!("chunk ({cx}, 0, {cz}): {} visible cells", visible_count(chunk));
                }
            }
        }
    }

    // Place a lamp above the floor and run a light pass.
    world.set_cell_with_extra(
        5,
        5,
        5,
        Cell {
            type_id: LAMP,
            light: 15,
            ..Cell::default()
        },
        Some(1),
    );
    let mut engine = LightEngine::with_max_radius(config.world.max_light_radius);
    let stats = engine.propagate(
        &mut world,
        &[LightItem {
            x: 5,
            y: 5,
            z: 5,
            level: 15,
        }],
    )?;
    info!(
        updated = stats.updated,
        levels = stats.levels,
        "light pass complete"
    );

    // Take the lamp away again: darkness pass first, then the cell edit.
    let removed = engine.remove(&mut world, 5, 5, 5)?;
    world.set_cell(5, 5, 5, Cell::default());
    info!(
        cleared = removed.cleared,
        relit = removed.updated,
        "light removed"
    );

    if config.debug.dump_world {
        world.dump();
    }
    info!("demo complete: {} chunks resident", world.index().len());
    Ok(())
}
