//! Bake a font into Unicode atlas pages.
//!
//! The Basic Multilingual Plane is cut into 256 pages of 256 code points. Each
//! page becomes one square atlas of 16×16 tiles (`unicode_page_XX.png` or
//! `glyph_XX.png`), and every code point gets one byte in a 65536-byte width
//! table describing which sixteenths of its tile the glyph covers.
//!
//! - [`source`]: the rasterizer seams ([`GlyphSource`], [`FaceLoader`]).
//! - [`font`]: the swash implementation of those seams.
//! - [`placer`]: clipping, blitting and width descriptors.
//! - [`page`]: 256 glyphs → one atlas.
//! - [`metadata`]: the memory-mapped width table.
//! - [`distribute`]: page ranges per worker.
//! - [`codec`]: PNG output.

pub mod atlas;
pub mod codec;
pub mod color;
pub mod config;
pub mod distribute;
pub mod error;
pub mod font;
pub mod fullwidth;
pub mod manifest;
pub mod metadata;
pub mod page;
pub mod placer;
pub mod source;

use std::fs;

pub use atlas::Atlas;
pub use codec::{AtlasWriter, PngWriter};
pub use color::ColorConverter;
pub use config::{BakeConfig, Preview};
pub use error::{BakeError, Result, WorkerFault};
pub use font::{FontData, SwashFace, SwashLoader};
pub use manifest::{BakeReport, Manifest, PageRecord};
pub use metadata::MetadataStore;
pub use page::{parse_page, PageBuilder, PageNaming};
pub use source::{FaceLoader, GlyphSource, PixelFormat, RasterizedGlyph, RenderHint};

/// Run a full sweep (or a preview) described by `config`.
///
/// The face is loaded once on the calling thread before anything is written,
/// so font problems surface before any worker starts. Each worker then loads
/// its own face through `loader`.
pub fn bake<L, W>(config: &BakeConfig, loader: &L, writer: &W) -> Result<BakeReport>
where
  L: FaceLoader,
  W: AtlasWriter,
{
  config.validate()?;
  let face = loader.load()?;
  let baseline = face.baseline();

  if let Some(preview) = &config.preview {
    let mut builder = PageBuilder::new(face, config.tile_size, config.color);
    builder.preview(preview.page, &preview.path, writer)?;
    log::info!("preview of page {:02x} written to {}", preview.page, preview.path.display());
    return Ok(BakeReport {
      baseline,
      pages: vec![PageRecord { page: preview.page, file: preview.path.clone() }],
      metadata: None,
    });
  }
  drop(face);

  fs::create_dir_all(&config.output_dir)
    .map_err(|e| BakeError::io(format!("create {}", config.output_dir.display()), e))?;
  let mut store = MetadataStore::create(&config.metadata_path)?;

  let chunks = distribute::run(config.workers, &mut store, |chunk, slots| {
    let mut builder = PageBuilder::new(loader.load()?, config.tile_size, config.color);
    let mut records = Vec::with_capacity(chunk.len());
    for (page, slots) in chunk.pages().zip(slots.chunks_exact_mut(page::PAGE_LEN)) {
      let file = config.page_path(page, writer.extension());
      builder.bake(page, slots, &file, writer)?;
      log::info!("[{}] generated {page:02x} ({:6.2}%)", chunk.worker, chunk.progress(page));
      records.push(PageRecord { page, file });
    }
    log::info!("[{}] finished", chunk.worker);
    Ok(records)
  });

  // flush whatever the surviving workers wrote, then report
  let flushed = store.flush();
  let pages = chunks?.into_iter().flatten().collect();
  flushed?;

  Ok(BakeReport { baseline, pages, metadata: Some(config.metadata_path.clone()) })
}
