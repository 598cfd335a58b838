// ============================
// swash-backed glyph source
// ============================

use std::{path::Path, sync::Arc};

use swash::scale::{image::Content, Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::{CacheKey, FontRef, NormalizedCoord, StringId};

use crate::error::{BakeError, Result};
use crate::source::{FaceLoader, GlyphSource, PixelFormat, RasterizedGlyph, RenderHint};

/// Color outlines first, then embedded bitmaps, then plain outlines.
static SOURCES: [Source; 3] = [Source::ColorOutline(0), Source::ColorBitmap(StrikeWith::BestFit), Source::Outline];

/// Font bytes plus the location of one face inside them. Cheap to clone.
#[derive(Clone)]
pub struct FontData {
  data: Arc<[u8]>,
  offset: u32,
  key: CacheKey,
}

impl FontData {
  /// Read and parse face `index` of the font (collection) at `path`.
  pub fn open(path: &Path, index: u32) -> Result<Self> {
    let bytes = std::fs::read(path).map_err(|e| BakeError::FontLoad { path: path.to_path_buf(), reason: e.to_string() })?;
    Self::from_bytes(bytes, index).ok_or_else(|| BakeError::FontLoad {
      path: path.to_path_buf(),
      reason: format!("no parsable face at index {index}"),
    })
  }

  pub fn from_bytes(bytes: Vec<u8>, index: u32) -> Option<Self> {
    let font = FontRef::from_index(&bytes, index as usize)?;
    let (offset, key) = (font.offset, font.key);
    Some(Self { data: bytes.into(), offset, key })
  }

  pub fn font_ref(&self) -> FontRef<'_> {
    FontRef { data: &self.data, offset: self.offset, key: self.key }
  }

  pub fn family_name(&self) -> String {
    self
      .font_ref()
      .localized_strings()
      .find_by_id(StringId::Family, None)
      .map(|s| s.chars().collect())
      .unwrap_or_else(|| "<unnamed>".to_string())
  }

  /// Rows below the baseline at `size` px: `|descent| * size / unitsPerEm`.
  pub fn baseline(&self, size: u32) -> i32 {
    let metrics = self.font_ref().metrics(&[] as &[NormalizedCoord]);
    let upem = i64::from(metrics.units_per_em.max(1));
    (metrics.descent.abs() as i64 * i64::from(size) / upem) as i32
  }
}

/// Opens one [`SwashFace`] per worker over shared font bytes.
pub struct SwashLoader {
  font: FontData,
  size: u32,
  hint: RenderHint,
}

impl SwashLoader {
  pub fn open(path: &Path, face_index: u32, size: u32, hint: RenderHint) -> Result<Self> {
    let font = FontData::open(path, face_index)?;
    log::info!(
      "font {} loaded from {}, baseline {}",
      font.family_name(),
      path.display(),
      font.baseline(size)
    );
    Ok(Self { font, size, hint })
  }
}

impl FaceLoader for SwashLoader {
  type Source = SwashFace;

  fn load(&self) -> Result<SwashFace> {
    Ok(SwashFace::new(self.font.clone(), self.size, self.hint))
  }
}

/// A face at one pixel size with its own scaler cache.
pub struct SwashFace {
  font: FontData,
  ctx: ScaleContext,
  size: u32,
  hint: RenderHint,
  baseline: i32,
}

impl SwashFace {
  pub fn new(font: FontData, size: u32, hint: RenderHint) -> Self {
    let baseline = font.baseline(size);
    Self { font, ctx: ScaleContext::new(), size, hint, baseline }
  }
}

impl GlyphSource for SwashFace {
  fn baseline(&self) -> i32 {
    self.baseline
  }

  fn rasterize(&mut self, codepoint: u32) -> Option<RasterizedGlyph> {
    let ch = char::from_u32(codepoint)?;
    let font = self.font.font_ref();
    let gid = font.charmap().map(ch);
    if gid == 0 {
      return None;
    }

    let px = self.size as f32;
    let mut scaler = self.ctx.builder(font).size(px).hint(self.hint != RenderHint::Light).build();
    let mut render = Render::new(&SOURCES);
    render.format(Format::Alpha);
    let image = render.render(&mut scaler, gid)?;

    let (width, height) = (image.placement.width, image.placement.height);
    if width == 0 || height == 0 {
      return None;
    }
    let coverage = match image.content {
      Content::Mask => image.data,
      // color glyphs: alpha is the coverage
      Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
      Content::SubpixelMask => image
        .data
        .chunks_exact(4)
        .map(|px| ((u16::from(px[0]) + u16::from(px[1]) + u16::from(px[2])) / 3) as u8)
        .collect(),
    };

    let glyph = RasterizedGlyph {
      width,
      height,
      left: image.placement.left,
      top: image.placement.top,
      advance: font.glyph_metrics(&[] as &[NormalizedCoord]).scale(px).advance_width(gid),
      format: PixelFormat::Gray,
      pitch: width as usize,
      data: Some(coverage),
    };
    Some(match self.hint {
      RenderHint::Mono => glyph.threshold_to_mono(),
      RenderHint::Normal | RenderHint::Light => glyph,
    })
  }
}
