//! Coverage → atlas pixel conversion.
//!
//! The rasterizer hands back one coverage sample per pixel (0 = empty,
//! 255 = fully inked). A [`ColorConverter`] turns that sample into the bytes of
//! one atlas pixel. The atlas is cleared with `convert(0)`.

use image::ExtendedColorType;
use serde::Serialize;

/// Largest pixel any converter produces.
pub const MAX_CHANNELS: usize = 4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorConverter {
  /// White with coverage as alpha (LA8).
  #[default]
  GrayAlpha,
  /// Opaque grayscale, coverage as luma (L8).
  Gray,
  /// Solid RGB tint with coverage as alpha (RGBA8).
  Tint([u8; 3]),
}

impl ColorConverter {
  /// Bytes per atlas pixel.
  #[inline]
  pub const fn channels(self) -> usize {
    match self {
      Self::GrayAlpha => 2,
      Self::Gray => 1,
      Self::Tint(_) => 4,
    }
  }

  pub const fn color_type(self) -> ExtendedColorType {
    match self {
      Self::GrayAlpha => ExtendedColorType::La8,
      Self::Gray => ExtendedColorType::L8,
      Self::Tint(_) => ExtendedColorType::Rgba8,
    }
  }

  /// Map one coverage sample to a pixel. Only the first [`channels`](Self::channels)
  /// bytes are meaningful.
  #[inline]
  pub const fn convert(self, coverage: u8) -> [u8; MAX_CHANNELS] {
    match self {
      Self::GrayAlpha => [0xFF, coverage, 0, 0],
      Self::Gray => [coverage, 0, 0, 0],
      Self::Tint([r, g, b]) => [r, g, b, coverage],
    }
  }

  #[inline]
  pub const fn background(self) -> [u8; MAX_CHANNELS] {
    self.convert(0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gray_alpha_keeps_white_and_moves_coverage_to_alpha() {
    let c = ColorConverter::GrayAlpha;
    assert_eq!(&c.convert(0x80)[..c.channels()], &[0xFF, 0x80]);
    assert_eq!(&c.background()[..c.channels()], &[0xFF, 0x00]);
  }

  #[test]
  fn tint_is_constant_rgb() {
    let c = ColorConverter::Tint([0x10, 0x20, 0x30]);
    assert_eq!(c.convert(0xFF), [0x10, 0x20, 0x30, 0xFF]);
    assert_eq!(c.background(), [0x10, 0x20, 0x30, 0x00]);
    assert_eq!(c.color_type(), ExtendedColorType::Rgba8);
  }

  #[test]
  fn gray_is_single_channel() {
    let c = ColorConverter::Gray;
    assert_eq!(c.channels(), 1);
    assert_eq!(c.convert(42)[0], 42);
  }
}
