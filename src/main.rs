use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cubit_geom::{Aabb, Vec3};
use cubit_io::{load_or_generate, save_or_log};
use cubit_world::edit::{break_block, place_block};
use cubit_world::shade::face_shades;
use cubit_world::{BlockHit, DirtySet, FlatSlab, World};

mod cli;
mod config;

use cli::{Cli, Command};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let dims = cfg.world.dims().context("invalid [world] size")?;
    let level = cli.level.unwrap_or(cfg.level.path);

    let (mut world, outcome) = load_or_generate(&level, dims);
    log::debug!("world {}x{}x{} loaded={}", dims.sx(), dims.sy(), dims.sz(), outcome.loaded());
    let dirty = DirtySet::new();
    world.set_listener(dirty.clone());

    match cli.command {
        Command::Info => info(&world),
        Command::Get { x, y, z } => {
            println!(
                "block ({x}, {y}, {z}) = {} brightness {}",
                world.block_id(x, y, z),
                world.brightness(x, y, z)
            );
            for shade in face_shades(&world, x, y, z) {
                println!("  face {:<5} light {:.2} {:?}", shade.face.name(), shade.light, shade.layer);
            }
        }
        Command::Set { x, y, z, id } => {
            if !world.grid().in_bounds(x, y, z) {
                bail!("({x}, {y}, {z}) is outside the world");
            }
            world.set(x, y, z, id);
            report_dirty(&dirty);
            persist(&level, &world);
        }
        Command::Column { x, z } => column(&world, x, z)?,
        Command::Pick { sx, sy, sz, ex, ey, ez } => {
            match world.raytrace_block(Vec3::new(sx, sy, sz), Vec3::new(ex, ey, ez)) {
                Some(hit) => print_hit(&world, &hit),
                None => println!("no hit"),
            }
        }
        Command::Break { sx, sy, sz, ex, ey, ez } => {
            let Some(hit) = world.raytrace_block(Vec3::new(sx, sy, sz), Vec3::new(ex, ey, ez))
            else {
                println!("no hit");
                return Ok(());
            };
            print_hit(&world, &hit);
            if break_block(&mut world, &hit) {
                report_dirty(&dirty);
                persist(&level, &world);
            }
        }
        Command::Place { sx, sy, sz, ex, ey, ez, id } => {
            let Some(hit) = world.raytrace_block(Vec3::new(sx, sy, sz), Vec3::new(ex, ey, ez))
            else {
                println!("no hit");
                return Ok(());
            };
            print_hit(&world, &hit);
            if place_block(&mut world, &hit, id, None) {
                let (x, y, z) = hit.adjacent();
                println!("placed {id} at ({x}, {y}, {z})");
                report_dirty(&dirty);
                persist(&level, &world);
            } else {
                println!("nothing placed");
            }
        }
        Command::Collide { min_x, min_y, min_z, max_x, max_y, max_z } => {
            let query = Aabb::new(Vec3::new(min_x, min_y, min_z), Vec3::new(max_x, max_y, max_z));
            let boxes = world.cubes_in(&query);
            println!("{} solid box(es)", boxes.len());
            for b in boxes {
                println!("  ({}, {}, {})", b.min.x, b.min.y, b.min.z);
            }
        }
    }
    Ok(())
}

fn info(world: &World) {
    let dims = world.dims();
    let grid = world.grid();
    let tops = world.heightmap().as_slice();
    let empty_columns = tops.iter().filter(|&&t| t < 0).count();
    let highest = tops.iter().copied().max().unwrap_or(-1);
    println!("size {} x {} x {} ({} voxels)", dims.sx(), dims.sy(), dims.sz(), dims.volume());
    println!("solid blocks {}", grid.solid_count());
    println!("columns {} (empty {}), highest top {}", dims.columns(), empty_columns, highest);
    println!("flat surface layer y={}", FlatSlab::for_dims(dims).surface_y());
}

fn column(world: &World, x: i32, z: i32) -> Result<()> {
    let Some(top) = world.heightmap().top(x, z) else {
        bail!("column ({x}, {z}) is outside the world");
    };
    println!("column ({x}, {z}) top {top}");
    let sy = world.dims().sy() as i32;
    for y in (0..sy).rev() {
        let id = world.block_id(x, y, z);
        if id != 0 || y == top + 1 {
            println!("  y={y:<4} id={id:<3} brightness {}", world.brightness(x, y, z));
        }
    }
    Ok(())
}

fn print_hit(world: &World, hit: &BlockHit) {
    println!(
        "hit ({}, {}, {}) face {} id {}",
        hit.x,
        hit.y,
        hit.z,
        hit.face.name(),
        world.block_id(hit.x, hit.y, hit.z)
    );
}

fn report_dirty(dirty: &DirtySet) {
    for c in dirty.drain() {
        println!("chunk ({}, {}, {}) dirty", c.cx, c.cy, c.cz);
    }
}

fn persist(level: &Path, world: &World) {
    if !save_or_log(level, world) {
        println!("level not saved");
    }
}
