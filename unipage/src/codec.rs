//! Persisting finished atlases.

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

use image::{codecs::png::PngEncoder, ImageEncoder as _};

use crate::atlas::Atlas;
use crate::error::{BakeError, Result};

/// Image sink for finished pages. Shared by all workers, so it must be `Sync`.
pub trait AtlasWriter: Sync {
  /// File extension without the dot.
  fn extension(&self) -> &str;

  fn write(&self, atlas: &Atlas, path: &Path) -> Result<()>;
}

/// Writes atlases as PNG in the converter's native color type (L8, LA8 or RGBA8).
#[derive(Copy, Clone, Debug, Default)]
pub struct PngWriter;

impl PngWriter {
  /// Encode to an in-memory PNG.
  pub fn encode(atlas: &Atlas) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    encode_into(atlas, &mut out)?;
    Ok(out)
  }
}

impl AtlasWriter for PngWriter {
  fn extension(&self) -> &str {
    "png"
  }

  fn write(&self, atlas: &Atlas, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| BakeError::io(format!("create {}", path.display()), e))?;
    let mut out = BufWriter::new(file);
    encode_into(atlas, &mut out).map_err(|source| BakeError::Encode { path: path.to_path_buf(), source })?;
    out.flush().map_err(|e| BakeError::io(format!("write {}", path.display()), e))
  }
}

fn encode_into<W: Write>(atlas: &Atlas, out: W) -> Result<(), image::ImageError> {
  let side = atlas.side();
  PngEncoder::new(out).write_image(atlas.pixels(), side, side, atlas.converter().color_type())
}
