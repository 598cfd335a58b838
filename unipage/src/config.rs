use std::path::PathBuf;

use crate::color::ColorConverter;
use crate::error::{BakeError, Result};
use crate::page::PageNaming;
use crate::source::RenderHint;

/// File name of the width table inside the output directory.
pub const DEFAULT_METADATA_NAME: &str = "glyph_sizes.bin";

/// Render one page to one file instead of sweeping the whole plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
  pub page: u8,
  pub path: PathBuf,
}

/// Everything a bake needs, resolved.
#[derive(Clone, Debug)]
pub struct BakeConfig {
  pub font_path: PathBuf,
  pub face_index: u32,
  /// Glyph pixel size.
  pub font_size: u32,
  /// Tile edge in pixels; atlases are `16 * tile_size` square.
  pub tile_size: u32,
  /// Extra workers next to the controlling thread.
  pub workers: usize,
  pub hint: RenderHint,
  pub naming: PageNaming,
  pub output_dir: PathBuf,
  pub metadata_path: PathBuf,
  pub color: ColorConverter,
  pub preview: Option<Preview>,
}

impl BakeConfig {
  /// Defaults for everything but the inputs and outputs.
  pub fn new(font_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
    let output_dir = output_dir.into();
    Self {
      font_path: font_path.into(),
      face_index: 0,
      font_size: 14,
      tile_size: 16,
      workers: 0,
      hint: RenderHint::Normal,
      naming: PageNaming::Unicode,
      metadata_path: output_dir.join(DEFAULT_METADATA_NAME),
      output_dir,
      color: ColorConverter::GrayAlpha,
      preview: None,
    }
  }

  /// Reject configurations that cannot produce a correct bake. Nothing is
  /// written before this passes.
  pub fn validate(&self) -> Result<()> {
    if self.font_size == 0 {
      return Err(BakeError::ZeroSize("font size"));
    }
    if self.tile_size == 0 {
      return Err(BakeError::ZeroSize("tile size"));
    }
    if self.tile_size < self.font_size {
      return Err(BakeError::TileTooSmall { tile: self.tile_size, font: self.font_size });
    }
    if !self.font_path.is_file() {
      return Err(BakeError::FontMissing(self.font_path.clone()));
    }
    Ok(())
  }

  /// Where a sweep writes `page`.
  pub fn page_path(&self, page: u8, extension: &str) -> PathBuf {
    self.output_dir.join(self.naming.file_name(page, extension))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  fn existing_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
  }

  #[test]
  fn defaults_follow_output_dir() {
    let cfg = BakeConfig::new("font.ttf", "out");
    assert_eq!(cfg.metadata_path, Path::new("out").join("glyph_sizes.bin"));
    assert_eq!((cfg.font_size, cfg.tile_size, cfg.workers), (14, 16, 0));
    assert_eq!(cfg.page_path(0x41, "png"), Path::new("out").join("unicode_page_41.png"));
  }

  #[test]
  fn page_path_follows_naming() {
    let mut cfg = BakeConfig::new("font.ttf", "out");
    cfg.naming = PageNaming::Pocket;
    assert_eq!(cfg.page_path(0xAB, "png"), Path::new("out").join("glyph_AB.png"));
  }

  #[test]
  fn tile_must_hold_font() {
    let mut cfg = BakeConfig::new(existing_file(), "out");
    cfg.font_size = 20;
    assert!(matches!(cfg.validate(), Err(BakeError::TileTooSmall { tile: 16, font: 20 })));
    cfg.tile_size = 20;
    assert!(cfg.validate().is_ok());
  }

  #[test]
  fn missing_font_is_rejected() {
    let cfg = BakeConfig::new("/nonexistent/unipage/font.ttf", "out");
    assert!(matches!(cfg.validate(), Err(BakeError::FontMissing(_))));
  }

  #[test]
  fn zero_sizes_are_rejected() {
    let mut cfg = BakeConfig::new(existing_file(), "out");
    cfg.font_size = 0;
    assert!(matches!(cfg.validate(), Err(BakeError::ZeroSize("font size"))));
  }
}
