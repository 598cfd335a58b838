//! The swash face against a real font (DejaVu Sans, see fonts/DejaVuSans-LICENSE.txt).

use std::path::{Path, PathBuf};

use unipage::{
  bake, Atlas, AtlasWriter, BakeConfig, FontData, GlyphSource, PixelFormat, RenderHint, Result, SwashFace,
  SwashLoader,
};

const DEJAVU_SANS: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

fn font_path() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf")
}

fn face(hint: RenderHint) -> SwashFace {
  let font = FontData::from_bytes(DEJAVU_SANS.to_vec(), 0).expect("bundled font parses");
  SwashFace::new(font, 14, hint)
}

#[test]
fn family_and_baseline() {
  let font = FontData::from_bytes(DEJAVU_SANS.to_vec(), 0).unwrap();
  assert_eq!(font.family_name(), "DejaVu Sans");
  // descender 483 of 2048 units: 483 * 14 / 2048 = 3.3
  assert_eq!(font.baseline(14), 3);
  for hint in [RenderHint::Normal, RenderHint::Light, RenderHint::Mono] {
    assert_eq!(face(hint).baseline(), 3);
  }
}

#[test]
fn normal_hint_yields_gray_coverage() {
  let glyph = face(RenderHint::Normal).rasterize(0x41).expect("'A' is mapped");
  assert_eq!(glyph.format, PixelFormat::Gray);
  assert_eq!((glyph.width, glyph.height, glyph.top), (10, 10, 10));
  assert_eq!(glyph.pitch, glyph.width as usize);
  let data = glyph.data.as_deref().unwrap();
  assert_eq!(data.len(), (glyph.width * glyph.height) as usize);
  assert!(data.iter().any(|&c| c >= 0x80));
}

#[test]
fn mono_hint_yields_packed_bits() {
  let glyph = face(RenderHint::Mono).rasterize(0x41).expect("'A' is mapped");
  assert_eq!(glyph.format, PixelFormat::Mono);
  assert_eq!(glyph.pitch, glyph.width.div_ceil(8) as usize);
  assert_eq!(glyph.pitch, 2);
  let data = glyph.data.as_deref().unwrap();
  assert_eq!(data.len(), glyph.pitch * glyph.height as usize);
  // every sample is either fully on or fully off
  let mut on = 0;
  for i in 0..glyph.height {
    for j in 0..glyph.width {
      match glyph.sample(i, j) {
        0xFF => on += 1,
        0x00 => {}
        other => panic!("mono sample {other:#x} at ({i}, {j})"),
      }
    }
  }
  assert!(on > 0);
}

#[test]
fn missing_glyphs_are_none() {
  let mut face = face(RenderHint::Normal);
  // mapped but blank
  assert!(face.rasterize(0x20).is_none());
  // surrogate, not a scalar value
  assert!(face.rasterize(0xD800).is_none());
  // CJK is not in DejaVu Sans
  assert!(face.rasterize(0x4E2D).is_none());
}

/// Drops every atlas; only the width table matters here.
struct Discard;

impl AtlasWriter for Discard {
  fn extension(&self) -> &str {
    "png"
  }

  fn write(&self, _atlas: &Atlas, _path: &Path) -> Result<()> {
    Ok(())
  }
}

#[test]
fn sweep_descriptors_for_latin() {
  let dir = std::env::temp_dir().join(format!("unipage-swash-{}", std::process::id()));
  let _ = std::fs::remove_dir_all(&dir);
  let mut cfg = BakeConfig::new(font_path(), dir.clone());
  cfg.workers = 3;

  let loader = SwashLoader::open(&cfg.font_path, cfg.face_index, cfg.font_size, cfg.hint).unwrap();
  let report = bake(&cfg, &loader, &Discard).unwrap();
  assert_eq!(report.baseline, 3);

  let table = std::fs::read(&cfg.metadata_path).unwrap();
  assert_eq!(table[usize::from(b'A')], 0x0A);
  assert_eq!(table[usize::from(b'i')], 0x03);
  assert_eq!(table[usize::from(b'W')], 0x0E);
  assert_eq!(table[usize::from(b' ')], 0x00);
  assert_eq!(table[0x4E2D], 0x0F);
  let _ = std::fs::remove_dir_all(&dir);
}
