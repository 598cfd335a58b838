//! The per-code-point width table (`glyph_sizes.bin`).
//!
//! Exactly 65536 bytes, one descriptor per BMP code point, memory-mapped so
//! each worker can write its pages in place. Workers receive disjoint
//! `&mut` page slices (see [`MetadataStore::split_pages`]), so the borrow
//! checker rules out overlapping writers and no locking is needed.

use std::{
  fs::{File, OpenOptions},
  ops::RangeInclusive,
  path::{Path, PathBuf},
};

use memmap2::MmapMut;

use crate::error::{BakeError, Result};
use crate::page::PAGE_LEN;

/// Table size in bytes.
pub const METADATA_LEN: usize = 0x10000;

pub struct MetadataStore {
  path: PathBuf,
  map: MmapMut,
}

impl MetadataStore {
  /// Create (or truncate) the table at `path`, sized and zero-filled.
  pub fn create(path: &Path) -> Result<Self> {
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(true)
      .open(path)
      .map_err(|e| BakeError::io(format!("create {}", path.display()), e))?;
    file
      .set_len(METADATA_LEN as u64)
      .map_err(|e| BakeError::io(format!("resize {}", path.display()), e))?;
    Self::map(path, &file)
  }

  /// Map an existing table.
  pub fn open(path: &Path) -> Result<Self> {
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)
      .map_err(|e| BakeError::io(format!("open {}", path.display()), e))?;
    let len = file.metadata().map_err(|e| BakeError::io(format!("stat {}", path.display()), e))?.len();
    if len != METADATA_LEN as u64 {
      return Err(BakeError::io(
        format!("open {}", path.display()),
        std::io::Error::new(std::io::ErrorKind::InvalidData, format!("expected {METADATA_LEN} bytes, found {len}")),
      ));
    }
    Self::map(path, &file)
  }

  fn map(path: &Path, file: &File) -> Result<Self> {
    // SAFETY: the file was just opened by us with a fixed length and is not
    // resized while mapped; concurrent external modification is not supported.
    let map = unsafe { MmapMut::map_mut(file) }.map_err(|e| BakeError::io(format!("map {}", path.display()), e))?;
    Ok(Self { path: path.to_path_buf(), map })
  }

  #[inline]
  pub fn get(&self, cp: u16) -> u8 {
    self.map[usize::from(cp)]
  }

  #[inline]
  pub fn set(&mut self, cp: u16, descriptor: u8) {
    self.map[usize::from(cp)] = descriptor;
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.map
  }

  /// Hand out one mutable slice per page range. Ranges must be ascending,
  /// contiguous and together cover pages `0..=255`.
  pub fn split_pages(&mut self, chunks: &[RangeInclusive<u8>]) -> Vec<&mut [u8]> {
    let mut rest: &mut [u8] = &mut self.map;
    let mut out = Vec::with_capacity(chunks.len());
    for chunk in chunks {
      let len = chunk.clone().count() * PAGE_LEN;
      let (head, tail) = std::mem::take(&mut rest).split_at_mut(len);
      out.push(head);
      rest = tail;
    }
    debug_assert!(rest.is_empty());
    out
  }

  /// Flush the table to disk.
  pub fn flush(&self) -> Result<()> {
    self.map.flush().map_err(|e| BakeError::io(format!("flush {}", self.path.display()), e))
  }
}
