//! Code points that always claim the whole tile width.
//!
//! This is a policy list, not a measurement: CJK ideographs and fullwidth forms
//! are laid out as full cells by the consumer regardless of how much of the
//! cell the rendered glyph actually inks.

/// Inclusive ranges, sorted and non-overlapping.
pub const FULL_WIDTH_RANGES: &[(u32, u32)] = &[
  (0x3000, 0x30FF), // CJK symbols, hiragana, katakana
  (0x4E00, 0x9FAF), // CJK unified ideographs
  (0xFF00, 0xFFEF), // halfwidth and fullwidth forms
];

pub fn is_full_width(cp: u32) -> bool {
  FULL_WIDTH_RANGES
    .binary_search_by(|&(lo, hi)| {
      if hi < cp {
        core::cmp::Ordering::Less
      } else if lo > cp {
        core::cmp::Ordering::Greater
      } else {
        core::cmp::Ordering::Equal
      }
    })
    .is_ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn range_edges() {
    for &(lo, hi) in FULL_WIDTH_RANGES {
      assert!(!is_full_width(lo - 1));
      assert!(is_full_width(lo));
      assert!(is_full_width(hi));
      assert!(!is_full_width(hi + 1));
    }
  }

  #[test]
  fn latin_is_proportional() {
    assert!(!is_full_width('A' as u32));
    assert!(is_full_width('漢' as u32));
    assert!(is_full_width('Ａ' as u32));
  }

  #[test]
  fn ranges_are_sorted() {
    assert!(FULL_WIDTH_RANGES.windows(2).all(|w| w[0].1 < w[1].0));
  }
}
