//! Seams to the font rasterizer.
//!
//! The core never talks to a font library directly. A [`FaceLoader`] opens one
//! face per worker and the resulting [`GlyphSource`] turns code points into
//! [`RasterizedGlyph`]s.

use serde::Serialize;

use crate::error::{BakeError, Result};

/// Rasterizer quality selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderHint {
  #[default]
  Normal,
  Light,
  Mono,
}

impl TryFrom<u8> for RenderHint {
  type Error = BakeError;

  fn try_from(index: u8) -> Result<Self> {
    match index {
      0 => Ok(Self::Normal),
      1 => Ok(Self::Light),
      2 => Ok(Self::Mono),
      other => Err(BakeError::InvalidHint(other)),
    }
  }
}

/// Sample layout of a glyph bitmap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelFormat {
  /// 1 bit per pixel, MSB first.
  Mono,
  /// 8-bit coverage.
  Gray,
}

/// One rendered glyph, owned by the caller for the duration of a placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizedGlyph {
  pub width: u32,
  pub height: u32,
  /// Pixels from the pen position to the left edge of the bitmap.
  pub left: i32,
  /// Pixels from the baseline up to the top edge of the bitmap.
  pub top: i32,
  pub advance: f32,
  pub format: PixelFormat,
  /// Bytes per bitmap row.
  pub pitch: usize,
  /// `None` when the rasterizer produced metrics but no pixels.
  pub data: Option<Vec<u8>>,
}

impl RasterizedGlyph {
  /// Coverage at row `i`, column `j`, expanded to 8 bits.
  ///
  /// Out-of-range reads (short buffers) read as empty.
  #[inline]
  pub fn sample(&self, i: u32, j: u32) -> u8 {
    let Some(data) = &self.data else {
      return 0;
    };
    let row = i as usize * self.pitch;
    match self.format {
      PixelFormat::Gray => data.get(row + j as usize).copied().unwrap_or(0),
      PixelFormat::Mono => {
        let byte = data.get(row + j as usize / 8).copied().unwrap_or(0);
        if byte & (0x80 >> (j % 8)) != 0 {
          0xFF
        } else {
          0x00
        }
      }
    }
  }

  /// Pack an 8-bit coverage bitmap into a 1bpp one (50% threshold).
  pub fn threshold_to_mono(self) -> Self {
    if self.format == PixelFormat::Mono {
      return self;
    }
    let Some(data) = &self.data else {
      return Self { format: PixelFormat::Mono, pitch: 0, ..self };
    };
    let pitch = (self.width as usize).div_ceil(8);
    let mut bits = vec![0u8; pitch * self.height as usize];
    for i in 0..self.height as usize {
      for j in 0..self.width as usize {
        if data.get(i * self.pitch + j).copied().unwrap_or(0) >= 0x80 {
          bits[i * pitch + j / 8] |= 0x80 >> (j % 8);
        }
      }
    }
    Self { format: PixelFormat::Mono, pitch, data: Some(bits), ..self }
  }
}

/// A loaded face at a fixed pixel size.
pub trait GlyphSource {
  /// Rows reserved below the text baseline inside a tile.
  fn baseline(&self) -> i32;

  /// Render one code point. `None` means the face has nothing to draw for it.
  fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph>;
}

/// Opens a private [`GlyphSource`] for each worker.
pub trait FaceLoader: Sync {
  type Source: GlyphSource;

  fn load(&self) -> Result<Self::Source>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gray(width: u32, height: u32, data: Vec<u8>) -> RasterizedGlyph {
    RasterizedGlyph {
      width,
      height,
      left: 0,
      top: height as i32,
      advance: width as f32,
      format: PixelFormat::Gray,
      pitch: width as usize,
      data: Some(data),
    }
  }

  #[test]
  fn hint_index_is_validated() {
    assert_eq!(RenderHint::try_from(0).unwrap(), RenderHint::Normal);
    assert_eq!(RenderHint::try_from(2).unwrap(), RenderHint::Mono);
    assert!(matches!(RenderHint::try_from(3), Err(BakeError::InvalidHint(3))));
  }

  #[test]
  fn mono_samples_msb_first_with_pitch() {
    let g = RasterizedGlyph {
      width: 10,
      height: 2,
      left: 0,
      top: 2,
      advance: 10.0,
      format: PixelFormat::Mono,
      pitch: 4,
      data: Some(vec![0b1000_0001, 0b0100_0000, 0, 0, 0, 0, 0, 0]),
    };
    assert_eq!(g.sample(0, 0), 0xFF);
    assert_eq!(g.sample(0, 1), 0x00);
    assert_eq!(g.sample(0, 7), 0xFF);
    assert_eq!(g.sample(0, 9), 0xFF);
    assert_eq!(g.sample(1, 0), 0x00);
  }

  #[test]
  fn threshold_packs_bits() {
    let g = gray(9, 1, vec![0xFF, 0x10, 0x80, 0, 0, 0, 0, 0, 0x90]).threshold_to_mono();
    assert_eq!(g.format, PixelFormat::Mono);
    assert_eq!(g.pitch, 2);
    assert_eq!(g.data.as_deref(), Some(&[0b1010_0000, 0b1000_0000][..]));
    assert_eq!(g.sample(0, 8), 0xFF);
  }

  #[test]
  fn missing_buffer_samples_empty() {
    let mut g = gray(4, 4, Vec::new());
    g.data = None;
    assert_eq!(g.sample(1, 1), 0);
  }
}
