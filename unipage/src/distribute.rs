//! Splitting the 256 pages across workers.
//!
//! `workers` extra threads are started next to the controlling thread, giving
//! `workers + 1` contiguous chunks of `256 / (workers + 1)` pages each; the last
//! chunk also takes the remainder. The controlling thread works chunk 0 itself,
//! so `workers == 0` runs everything in place.
//!
//! Each chunk gets its own disjoint slice of the metadata table. A failing or
//! panicking worker does not stop the others; faults are collected after every
//! worker has been joined and reported together.

use std::{
  any::Any,
  ops::RangeInclusive,
  panic::{self, AssertUnwindSafe},
  thread,
};

use crate::error::{BakeError, Result, WorkerFault};
use crate::metadata::MetadataStore;
use crate::page::PAGE_COUNT;

/// One worker's contiguous page range.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
  pub worker: usize,
  pub first: u8,
  pub last: u8,
}

impl Chunk {
  pub fn pages(&self) -> RangeInclusive<u8> {
    self.first..=self.last
  }

  pub fn len(&self) -> usize {
    usize::from(self.last - self.first) + 1
  }

  /// Fraction of the chunk done after finishing `page`, in percent.
  pub fn progress(&self, page: u8) -> f32 {
    if self.first == self.last {
      return 100.0;
    }
    f32::from(page - self.first) / f32::from(self.last - self.first) * 100.0
  }
}

/// Partition pages `0..=255` for `workers` extra workers.
///
/// More than 255 extra workers would leave chunks empty, so the chunk count is
/// capped at 256.
pub fn partition(workers: usize) -> Vec<Chunk> {
  let count = workers.saturating_add(1).min(PAGE_COUNT);
  let splice = PAGE_COUNT / count;
  (0..count)
    .map(|k| {
      let first = k * splice;
      let last = if k + 1 == count { PAGE_COUNT - 1 } else { (k + 1) * splice - 1 };
      // both bounds are < 256
      Chunk { worker: k, first: first as u8, last: last as u8 }
    })
    .collect()
}

/// Run `job` once per chunk, each with its own metadata slice, and wait for all
/// of them. Results come back in chunk order.
pub fn run<T, F>(workers: usize, store: &mut MetadataStore, job: F) -> Result<Vec<T>>
where
  T: Send,
  F: Fn(Chunk, &mut [u8]) -> Result<T> + Sync,
{
  let chunks = partition(workers);
  let ranges: Vec<_> = chunks.iter().map(Chunk::pages).collect();
  let slices = store.split_pages(&ranges);
  let job = &job;

  let outcomes: Vec<(Chunk, thread::Result<Result<T>>)> = thread::scope(|s| {
    let mut work = chunks.iter().copied().zip(slices);
    let own = work.next();
    let handles: Vec<_> = work
      .map(|(chunk, slots)| {
        let handle = thread::Builder::new()
          .name(format!("unipage-worker-{}", chunk.worker))
          .spawn_scoped(s, move || job(chunk, slots));
        (chunk, handle)
      })
      .collect();

    let mut outcomes = Vec::with_capacity(chunks.len());
    if let Some((chunk, slots)) = own {
      outcomes.push((chunk, panic::catch_unwind(AssertUnwindSafe(|| job(chunk, slots)))));
    }
    for (chunk, handle) in handles {
      let outcome = match handle {
        Ok(handle) => handle.join(),
        Err(e) => Ok(Err(BakeError::io(format!("spawn worker {}", chunk.worker), e))),
      };
      outcomes.push((chunk, outcome));
    }
    outcomes
  });

  let mut results = Vec::with_capacity(outcomes.len());
  let mut faults = Vec::new();
  for (chunk, outcome) in outcomes {
    let reason = match outcome {
      Ok(Ok(value)) => {
        results.push(value);
        continue;
      }
      Ok(Err(e)) => e.to_string(),
      Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    log::error!("[{}] pages {:02x}..={:02x} failed: {reason}", chunk.worker, chunk.first, chunk.last);
    faults.push(WorkerFault { worker: chunk.worker, first_page: chunk.first, last_page: chunk.last, reason });
  }

  if faults.is_empty() {
    Ok(results)
  } else {
    Err(BakeError::WorkerFailure { faults, workers: chunks.len() })
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(s) = payload.downcast_ref::<&str>() {
    s
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s
  } else {
    "unknown panic"
  }
}
