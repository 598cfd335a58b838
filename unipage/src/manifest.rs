//! JSON summary of a finished sweep, written next to the pages on request.
//!
//! ```json
//! {
//!   "font": "font.ttf",
//!   "face_index": 0,
//!   "font_size": 14,
//!   "tile_size": 16,
//!   "baseline": 3,
//!   "hint": "normal",
//!   "naming": "unicode",
//!   "color": "gray-alpha",
//!   "workers": 3,
//!   "metadata": "out/glyph_sizes.bin",
//!   "pages": [{ "page": 0, "file": "out/unicode_page_00.png" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::color::ColorConverter;
use crate::config::BakeConfig;
use crate::page::PageNaming;
use crate::source::RenderHint;

/// One written atlas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRecord {
  pub page: u8,
  pub file: PathBuf,
}

/// What [`bake`](crate::bake) produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BakeReport {
  pub baseline: i32,
  /// Written pages in page order.
  pub pages: Vec<PageRecord>,
  /// `None` for previews.
  pub metadata: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
  pub font: &'a Path,
  pub face_index: u32,
  pub font_size: u32,
  pub tile_size: u32,
  pub baseline: i32,
  pub hint: RenderHint,
  pub naming: PageNaming,
  pub color: ColorConverter,
  pub workers: usize,
  pub metadata: Option<&'a Path>,
  pub pages: &'a [PageRecord],
}

impl<'a> Manifest<'a> {
  pub fn new(config: &'a BakeConfig, report: &'a BakeReport) -> Self {
    Self {
      font: &config.font_path,
      face_index: config.face_index,
      font_size: config.font_size,
      tile_size: config.tile_size,
      baseline: report.baseline,
      hint: config.hint,
      naming: config.naming,
      color: config.color,
      workers: config.workers,
      metadata: report.metadata.as_deref(),
      pages: &report.pages,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn serializes_config_and_pages() {
    let mut config = BakeConfig::new("font.ttf", "out");
    config.naming = PageNaming::Pocket;
    config.hint = RenderHint::Mono;
    let report = BakeReport {
      baseline: 3,
      pages: vec![PageRecord { page: 0x41, file: "out/glyph_41.png".into() }],
      metadata: Some("out/glyph_sizes.bin".into()),
    };
    let json = serde_json::to_value(Manifest::new(&config, &report)).unwrap();
    assert_eq!(json["naming"], "pocket");
    assert_eq!(json["hint"], "mono");
    assert_eq!(json["color"], "gray-alpha");
    assert_eq!(json["baseline"], 3);
    assert_eq!(json["pages"][0]["page"], 0x41);
    assert_eq!(json["pages"][0]["file"], "out/glyph_41.png");
  }
}
