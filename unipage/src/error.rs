use std::{fmt, io, path::PathBuf};

/// Everything that can stop a bake.
///
/// Configuration problems are raised before any output is produced. Font
/// loading problems are raised on the controller before any worker starts.
/// I/O problems are fatal to the worker that hits them; the controller then
/// reports them as a [`BakeError::WorkerFailure`] once every worker is reaped.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
  /// Tile cell smaller than the requested glyph pixel size.
  #[error("tile size {tile} must be at least the font size {font}")]
  TileTooSmall { tile: u32, font: u32 },

  /// Font size or tile size of zero.
  #[error("{0} must be greater than zero")]
  ZeroSize(&'static str),

  /// Render hint index outside the known set.
  #[error("render hint {0} is out of range (0 = normal, 1 = light, 2 = mono)")]
  InvalidHint(u8),

  /// Page index that does not parse as a byte.
  #[error("invalid page {0:?} (expected 00..ff)")]
  InvalidPage(String),

  #[error("font file {} does not exist", .0.display())]
  FontMissing(PathBuf),

  #[error("failed to load font {}: {reason}", .path.display())]
  FontLoad { path: PathBuf, reason: String },

  #[error("{context}: {source}")]
  Io {
    context: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to encode atlas {}: {source}", .path.display())]
  Encode {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },

  #[error("{} of {workers} workers failed: {}", .faults.len(), FaultList(.faults))]
  WorkerFailure { faults: Vec<WorkerFault>, workers: usize },
}

impl BakeError {
  pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
    Self::Io { context: context.into(), source }
  }

  /// True for errors that are reported before any work starts.
  pub fn is_config(&self) -> bool {
    matches!(
      self,
      Self::TileTooSmall { .. } | Self::ZeroSize(_) | Self::InvalidHint(_) | Self::InvalidPage(_) | Self::FontMissing(_)
    )
  }
}

/// One worker that did not finish its chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFault {
  pub worker: usize,
  pub first_page: u8,
  pub last_page: u8,
  pub reason: String,
}

impl fmt::Display for WorkerFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "worker {} (pages {:02x}..={:02x}): {}",
      self.worker, self.first_page, self.last_page, self.reason
    )
  }
}

struct FaultList<'a>(&'a [WorkerFault]);

impl fmt::Display for FaultList<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, fault) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{fault}")?;
    }
    Ok(())
  }
}

pub type Result<T, E = BakeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn worker_failure_lists_every_fault() {
    let err = BakeError::WorkerFailure {
      workers: 3,
      faults: vec![
        WorkerFault { worker: 1, first_page: 0x55, last_page: 0xa9, reason: "disk full".into() },
        WorkerFault { worker: 2, first_page: 0xaa, last_page: 0xff, reason: "panicked".into() },
      ],
    };
    assert_eq!(
      err.to_string(),
      "2 of 3 workers failed: worker 1 (pages 55..=a9): disk full; worker 2 (pages aa..=ff): panicked"
    );
    assert!(!err.is_config());
  }

  #[test]
  fn config_errors_are_classified() {
    assert!(BakeError::TileTooSmall { tile: 8, font: 14 }.is_config());
    assert!(BakeError::InvalidHint(7).is_config());
    assert!(!BakeError::FontLoad { path: "x.ttf".into(), reason: "bad".into() }.is_config());
  }
}
