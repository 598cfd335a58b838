//! Glyph placement inside a tile.
//!
//! Every glyph of a page sits on one shared text baseline: `baseline` rows are
//! reserved at the bottom of each tile for descenders and the glyph's top
//! bearing decides how far down from the tile top it starts. Horizontally the
//! glyph starts at its own left bearing.
//!
//! Geometry is clamped, never rejected. Bitmaps larger than the tile are
//! truncated, offsets are pulled back so that `offset + extent <= tile_size` on
//! both axes, and the blit only ever touches the destination tile.
//!
//! Each placement also yields a one-byte width descriptor:
//! - `0x0F` for code points in the full-width set;
//! - otherwise `left << 4 | right`, the glyph's horizontal footprint quantized
//!   to sixteenths of the tile (`left` rounded down, `right` rounded up).

use crate::atlas::{Atlas, GRID};
use crate::fullwidth::is_full_width;
use crate::source::RasterizedGlyph;

/// Descriptor for glyphs that own the whole tile width.
pub const FULL_WIDTH: u8 = 0x0F;

/// Where a glyph lands inside its tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
  /// First tile row written.
  pub row_offset: u32,
  /// First tile column written.
  pub col_offset: u32,
  /// Bitmap rows copied, `<= tile_size`.
  pub rows: u32,
  /// Bitmap columns copied, `<= tile_size`.
  pub cols: u32,
  pub descriptor: u8,
}

/// Tile size and baseline shared by every glyph of a face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileLayout {
  pub tile_size: u32,
  pub baseline: i32,
}

impl TileLayout {
  pub fn new(tile_size: u32, baseline: i32) -> Self {
    Self { tile_size, baseline }
  }

  /// Compute the clipped placement of `glyph` for code point `cp`.
  pub fn place(&self, cp: u32, glyph: &RasterizedGlyph) -> Placement {
    let t = i64::from(self.tile_size);
    let (rows, cols) = if glyph.data.is_some() {
      (glyph.height.min(self.tile_size), glyph.width.min(self.tile_size))
    } else {
      (0, 0)
    };

    let mut row_offset = (t - (i64::from(self.baseline) + i64::from(glyph.top))).max(0);
    let mut col_offset = i64::from(glyph.left).max(0);
    row_offset -= (row_offset + i64::from(rows) - t).max(0);
    col_offset -= (col_offset + i64::from(cols) - t).max(0);

    // rows/cols <= t, so both offsets land in [0, t - extent]
    let row_offset = row_offset as u32;
    let col_offset = col_offset as u32;

    Placement {
      row_offset,
      col_offset,
      rows,
      cols,
      descriptor: descriptor(cp, col_offset, cols, self.tile_size),
    }
  }

  /// Placement of a code point the face has no glyph for.
  pub fn empty(&self, cp: u32) -> Placement {
    Placement { row_offset: 0, col_offset: 0, rows: 0, cols: 0, descriptor: descriptor(cp, 0, 0, self.tile_size) }
  }

  /// Place `glyph` into tile `(tile_row, tile_col)` of `atlas` and return where it went.
  ///
  /// Tiles outside the 16×16 grid are ignored (nothing is written).
  pub fn blit(&self, atlas: &mut Atlas, tile_row: u32, tile_col: u32, cp: u32, glyph: &RasterizedGlyph) -> Placement {
    let placement = self.place(cp, glyph);
    if tile_row >= GRID || tile_col >= GRID || atlas.tile_size() != self.tile_size {
      return placement;
    }
    log::debug!(
      "U+{cp:04X} tile {tile_row},{tile_col}: [{}x{}] at <{},{}> desc {:02x}",
      placement.cols,
      placement.rows,
      placement.row_offset,
      placement.col_offset,
      placement.descriptor
    );
    let y0 = tile_row * self.tile_size + placement.row_offset;
    let x0 = tile_col * self.tile_size + placement.col_offset;
    for i in 0..placement.rows {
      for j in 0..placement.cols {
        atlas.put(y0 + i, x0 + j, glyph.sample(i, j));
      }
    }
    placement
  }
}

/// Pack the horizontal footprint `[col_offset, col_offset + cols)` of a tile of
/// `tile_size` columns into one byte.
pub fn descriptor(cp: u32, col_offset: u32, cols: u32, tile_size: u32) -> u8 {
  if is_full_width(cp) {
    return FULL_WIDTH;
  }
  let t = u64::from(tile_size.max(1));
  let left = (u64::from(col_offset) * 15 / t).min(15) as u8;
  let right = ((u64::from(col_offset) + u64::from(cols)) * 15).div_ceil(t).min(15) as u8;
  debug_assert!(left <= right);
  left << 4 | right
}
