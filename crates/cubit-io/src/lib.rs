//! Level persistence: a gzip stream holding exactly one byte per voxel in grid
//! index order. No header; dimensions come from the caller and must match.
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use thiserror::Error;

use cubit_world::{GridError, VoxelGrid, World, WorldDims};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level i/o: {0}")]
    Io(#[from] io::Error),
    #[error("level data ends after {read} of {expected} bytes")]
    Truncated { expected: usize, read: usize },
    #[error("level data is larger than {expected} bytes")]
    TrailingData { expected: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Whether a world came from disk or from the fallback fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Generated,
}

impl LoadOutcome {
    #[inline]
    pub fn loaded(self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

// `Read::read` that retries on `Interrupted`.
fn read_retrying<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            other => return other,
        }
    }
}

/// Decodes a level stream for a grid of `dims`.
pub fn decode_blocks<R: Read>(reader: R, dims: WorldDims) -> Result<VoxelGrid, LevelError> {
    let expected = dims.volume();
    let mut gz = GzDecoder::new(reader);
    let mut blocks = vec![0u8; expected];
    let mut read = 0;
    while read < expected {
        match read_retrying(&mut gz, &mut blocks[read..])? {
            0 => return Err(LevelError::Truncated { expected, read }),
            n => read += n,
        }
    }
    let mut extra = [0u8; 1];
    if read_retrying(&mut gz, &mut extra)? != 0 {
        return Err(LevelError::TrailingData { expected });
    }
    Ok(VoxelGrid::from_bytes(dims, blocks)?)
}

/// Encodes raw block bytes as a level stream.
pub fn encode_blocks<W: Write>(writer: W, blocks: &[u8]) -> Result<(), LevelError> {
    let mut gz = GzEncoder::new(writer, Compression::default());
    gz.write_all(blocks)?;
    gz.finish()?.flush()?;
    Ok(())
}

pub fn load_level(path: &Path, dims: WorldDims) -> Result<World, LevelError> {
    let file = File::open(path)?;
    let grid = decode_blocks(BufReader::new(file), dims)?;
    Ok(World::from_grid(grid))
}

pub fn save_level(path: &Path, world: &World) -> Result<(), LevelError> {
    let file = File::create(path)?;
    encode_blocks(BufWriter::new(file), world.grid().as_bytes())
}

/// Loads the level at `path`, falling back to the flat slab on any failure.
pub fn load_or_generate(path: &Path, dims: WorldDims) -> (World, LoadOutcome) {
    match load_level(path, dims) {
        Ok(world) => {
            log::info!("loaded level {} ({}x{}x{})", path.display(), dims.sx(), dims.sy(), dims.sz());
            (world, LoadOutcome::Loaded)
        }
        Err(LevelError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("no level at {}; generating flat world", path.display());
            (World::flat(dims), LoadOutcome::Generated)
        }
        Err(e) => {
            log::warn!("failed loading level {}: {}; generating flat world", path.display(), e);
            (World::flat(dims), LoadOutcome::Generated)
        }
    }
}

/// Saves the level, logging instead of failing. Returns whether it was written.
pub fn save_or_log(path: &Path, world: &World) -> bool {
    match save_level(path, world) {
        Ok(()) => {
            log::info!("saved level {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("failed saving level {}: {}", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> WorldDims {
        WorldDims::new(4, 3, 5).unwrap()
    }

    #[test]
    fn stream_round_trip_is_byte_exact() {
        let grid = VoxelGrid::from_fn(dims(), |x, y, z| ((x + 2 * y + 3 * z) % 5) as u8);
        let mut buf = Vec::new();
        encode_blocks(&mut buf, grid.as_bytes()).unwrap();
        let back = decode_blocks(buf.as_slice(), dims()).unwrap();
        assert_eq!(back.as_bytes(), grid.as_bytes());
    }

    #[test]
    fn short_stream_is_truncated() {
        let mut buf = Vec::new();
        encode_blocks(&mut buf, &[1u8; 59]).unwrap();
        match decode_blocks(buf.as_slice(), dims()) {
            Err(LevelError::Truncated { expected: 60, read: 59 }) => {}
            other => panic!("unexpected {:?}", other.map(|g| g.dims())),
        }
    }

    #[test]
    fn long_stream_is_rejected() {
        let mut buf = Vec::new();
        encode_blocks(&mut buf, &[1u8; 61]).unwrap();
        assert!(matches!(
            decode_blocks(buf.as_slice(), dims()),
            Err(LevelError::TrailingData { expected: 60 })
        ));
    }

    // Yields `Interrupted` before every byte it hands out.
    struct Stuttering<'a> {
        data: &'a [u8],
        interrupt_next: bool,
    }

    impl Read for Stuttering<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt_next = !self.interrupt_next;
            if !self.interrupt_next {
                return Err(io::ErrorKind::Interrupted.into());
            }
            if self.data.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[0];
            self.data = &self.data[1..];
            Ok(1)
        }
    }

    #[test]
    fn interrupted_reads_are_retried_to_the_end() {
        let mut r = Stuttering { data: &[7, 8], interrupt_next: true };
        let mut buf = [0u8; 4];
        assert_eq!(read_retrying(&mut r, &mut buf).unwrap(), 1);
        assert_eq!(read_retrying(&mut r, &mut buf[1..]).unwrap(), 1);
        assert_eq!(&buf[..2], &[7, 8]);
        // end of stream still reports zero after an interruption
        let mut tail = [0u8; 1];
        assert_eq!(read_retrying(&mut r, &mut tail).unwrap(), 0);
    }

    #[test]
    fn non_gzip_data_is_an_error() {
        let junk = vec![0x42u8; 100];
        assert!(decode_blocks(junk.as_slice(), dims()).is_err());
    }
}
