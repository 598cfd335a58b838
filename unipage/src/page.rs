//! One page = 256 code points = one 16×16 atlas.

use std::path::Path;

use serde::Serialize;

use crate::atlas::{Atlas, GRID};
use crate::codec::AtlasWriter;
use crate::color::ColorConverter;
use crate::error::{BakeError, Result};
use crate::placer::TileLayout;
use crate::source::GlyphSource;

/// Code points per page.
pub const PAGE_LEN: usize = 256;

/// Number of pages in the Basic Multilingual Plane.
pub const PAGE_COUNT: usize = 256;

/// Output file naming scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageNaming {
  /// `unicode_page_4e.png`
  #[default]
  Unicode,
  /// `glyph_4E.png`
  Pocket,
}

impl PageNaming {
  pub fn prefix(self) -> &'static str {
    match self {
      Self::Unicode => "unicode_page",
      Self::Pocket => "glyph",
    }
  }

  pub fn file_name(self, page: u8, extension: &str) -> String {
    match self {
      Self::Unicode => format!("{}_{page:02x}.{extension}", self.prefix()),
      Self::Pocket => format!("{}_{page:02X}.{extension}", self.prefix()),
    }
  }
}

/// Parse a page index given as hex (`4e`, `0x4E`) or as a code point inside the page (`U+4E2D`).
pub fn parse_page(s: &str) -> Result<u8> {
  let t = s.trim();
  let invalid = || BakeError::InvalidPage(s.to_string());
  if let Some(cp) = t.strip_prefix("U+").or_else(|| t.strip_prefix("u+")) {
    let cp = u32::from_str_radix(cp, 16).map_err(|_| invalid())?;
    return u8::try_from(cp >> 8).map_err(|_| invalid());
  }
  let hex = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")).unwrap_or(t);
  u8::from_str_radix(hex, 16).map_err(|_| invalid())
}

/// Renders pages of one face into a reusable atlas.
pub struct PageBuilder<S> {
  source: S,
  layout: TileLayout,
  atlas: Atlas,
}

impl<S: GlyphSource> PageBuilder<S> {
  pub fn new(source: S, tile_size: u32, converter: ColorConverter) -> Self {
    let layout = TileLayout::new(tile_size, source.baseline());
    Self { source, layout, atlas: Atlas::new(tile_size, converter) }
  }

  pub fn atlas(&self) -> &Atlas {
    &self.atlas
  }

  /// Clear the atlas and draw all 256 glyphs of `page`. Returns the width
  /// descriptor of each code point in page order.
  pub fn render(&mut self, page: u8) -> [u8; PAGE_LEN] {
    self.atlas.clear();
    let mut descriptors = [0u8; PAGE_LEN];
    let base = u32::from(page) * PAGE_LEN as u32;
    for row in 0..GRID {
      for col in 0..GRID {
        let slot = (row * GRID + col) as usize;
        let cp = base + slot as u32;
        descriptors[slot] = match self.source.rasterize(cp) {
          Some(glyph) => self.layout.blit(&mut self.atlas, row, col, cp, &glyph).descriptor,
          None => self.layout.empty(cp).descriptor,
        };
      }
    }
    descriptors
  }

  /// Render `page`, store its descriptors into `slots` and write the atlas to `path`.
  pub fn bake<W: AtlasWriter + ?Sized>(&mut self, page: u8, slots: &mut [u8], path: &Path, writer: &W) -> Result<()> {
    let descriptors = self.render(page);
    slots[..PAGE_LEN].copy_from_slice(&descriptors);
    writer.write(&self.atlas, path)
  }

  /// Render a single page to `path` without producing descriptors anywhere.
  pub fn preview<W: AtlasWriter + ?Sized>(&mut self, page: u8, path: &Path, writer: &W) -> Result<()> {
    self.render(page);
    writer.write(&self.atlas, path)
  }
}
