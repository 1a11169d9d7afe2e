use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use cubit_world::{GridError, WorldDims};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config: {0}")]
    Io(#[from] io::Error),
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct CubitConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub level: LevelSection,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WorldSection {
    #[serde(default = "d_size_xz")]
    pub size_x: usize,
    #[serde(default = "d_size_y")]
    pub size_y: usize,
    #[serde(default = "d_size_xz")]
    pub size_z: usize,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            size_x: d_size_xz(),
            size_y: d_size_y(),
            size_z: d_size_xz(),
        }
    }
}

impl WorldSection {
    pub fn dims(&self) -> Result<WorldDims, GridError> {
        WorldDims::new(self.size_x, self.size_y, self.size_z)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LevelSection {
    #[serde(default = "d_level_path")]
    pub path: PathBuf,
}

impl Default for LevelSection {
    fn default() -> Self {
        Self {
            path: d_level_path(),
        }
    }
}

fn d_size_xz() -> usize {
    256
}
fn d_size_y() -> usize {
    64
}
fn d_level_path() -> PathBuf {
    PathBuf::from("level.dat")
}

pub fn parse_config(s: &str) -> Result<CubitConfig, toml::de::Error> {
    toml::from_str(s)
}

/// Reads the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<CubitConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(parse_config(&s)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("config {} not found; using defaults", path.display());
            Ok(CubitConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
