//! # Page atlas buffer
//!
//! One square pixel buffer of side `tile_size * 16`, split into a 16×16 grid of
//! `tile_size × tile_size` tiles. Tile `(row, col)` holds code point
//! `page * 256 + row * 16 + col`.
//!
//! ## Layout
//! - Row-major, `channels` bytes per pixel, no padding between rows.
//! - Pixel format fixed by the [`ColorConverter`] chosen at construction.
//! - The buffer is reused page after page; [`Atlas::clear`] restores the
//!   background before every page.

use crate::color::ColorConverter;

/// Tiles per atlas side.
pub const GRID: u32 = 16;

#[derive(Clone, Debug)]
pub struct Atlas {
  tile_size: u32,
  converter: ColorConverter,
  pixels: Vec<u8>,
}

impl Atlas {
  /// Allocate a cleared atlas.
  pub fn new(tile_size: u32, converter: ColorConverter) -> Self {
    let side = tile_size as usize * GRID as usize;
    let mut atlas = Self { tile_size, converter, pixels: vec![0; side * side * converter.channels()] };
    atlas.clear();
    atlas
  }

  #[inline]
  pub fn tile_size(&self) -> u32 {
    self.tile_size
  }

  /// Pixels per side.
  #[inline]
  pub fn side(&self) -> u32 {
    self.tile_size * GRID
  }

  #[inline]
  pub fn converter(&self) -> ColorConverter {
    self.converter
  }

  /// Raw bytes, row-major.
  #[inline]
  pub fn pixels(&self) -> &[u8] {
    &self.pixels
  }

  /// Fill every pixel with the converter's background.
  pub fn clear(&mut self) {
    let channels = self.converter.channels();
    let bg = self.converter.background();
    for px in self.pixels.chunks_exact_mut(channels) {
      px.copy_from_slice(&bg[..channels]);
    }
  }

  /// True when every pixel equals the background.
  pub fn is_blank(&self) -> bool {
    let channels = self.converter.channels();
    let bg = self.converter.background();
    self.pixels.chunks_exact(channels).all(|px| px == &bg[..channels])
  }

  /// Pixel at atlas coordinates (`y` down, `x` right).
  pub fn pixel(&self, y: u32, x: u32) -> &[u8] {
    let channels = self.converter.channels();
    let at = self.offset(y, x);
    &self.pixels[at..at + channels]
  }

  /// Convert one coverage sample and store it at atlas coordinates.
  #[inline]
  pub(crate) fn put(&mut self, y: u32, x: u32, coverage: u8) {
    let channels = self.converter.channels();
    let px = self.converter.convert(coverage);
    let at = self.offset(y, x);
    self.pixels[at..at + channels].copy_from_slice(&px[..channels]);
  }

  #[inline]
  fn offset(&self, y: u32, x: u32) -> usize {
    (y as usize * self.side() as usize + x as usize) * self.converter.channels()
  }
}
