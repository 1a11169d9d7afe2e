use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cubit", about = "Inspect and edit a cubit voxel level")]
pub struct Cli {
    /// World config (TOML)
    #[arg(long, default_value = "cubit.toml")]
    pub config: PathBuf,

    /// Level file; overrides `level.path` from the config
    #[arg(long)]
    pub level: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print dimensions and occupancy summary
    Info,
    /// Read one block and its brightness
    #[command(allow_negative_numbers = true)]
    Get { x: i32, y: i32, z: i32 },
    /// Write one block and save the level
    #[command(allow_negative_numbers = true)]
    Set { x: i32, y: i32, z: i32, id: u8 },
    /// Column top height and brightness profile
    #[command(allow_negative_numbers = true)]
    Column { x: i32, z: i32 },
    /// Trace a segment and report the first block hit
    #[command(allow_negative_numbers = true)]
    Pick {
        sx: f64,
        sy: f64,
        sz: f64,
        ex: f64,
        ey: f64,
        ez: f64,
    },
    /// Remove the first block hit by a segment and save
    #[command(allow_negative_numbers = true)]
    Break {
        sx: f64,
        sy: f64,
        sz: f64,
        ex: f64,
        ey: f64,
        ez: f64,
    },
    /// Place a block against the first face hit by a segment and save
    #[command(allow_negative_numbers = true)]
    Place {
        sx: f64,
        sy: f64,
        sz: f64,
        ex: f64,
        ey: f64,
        ez: f64,
        #[arg(long, default_value_t = 1)]
        id: u8,
    },
    /// List solid unit boxes overlapping a box
    #[command(allow_negative_numbers = true)]
    Collide {
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    },
}
