//! Reverse link resolution: byte offset → headword.

use log::trace;

use crate::dict::index::WordIndex;
use crate::dict::types::options::LinkResolution;

/// Finds the headword owning the entry at `offset`.
///
/// Ties go to the first headword in index order.
pub fn resolve_offset(index: &WordIndex, offset: u32, mode: LinkResolution) -> Option<&str> {
    match mode {
        LinkResolution::Exact => resolve_exact(index, offset),
        LinkResolution::Nearest { tolerance } => resolve_nearest(index, offset, tolerance),
    }
}

fn resolve_exact(index: &WordIndex, offset: u32) -> Option<&str> {
    index
        .iter()
        .find(|(_, fragments)| fragments.iter().any(|entry| entry.start_offset == offset))
        .map(|(word, _)| word)
}

fn resolve_nearest(index: &WordIndex, offset: u32, tolerance: u32) -> Option<&str> {
    let mut best: Option<(&str, u32)> = None;
    for (word, fragments) in index.iter() {
        for entry in fragments {
            let distance = entry.start_offset.abs_diff(offset);
            if distance > tolerance {
                continue;
            }
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((word, distance));
                if distance == 0 {
                    return Some(word);
                }
            }
        }
    }
    if let Some((word, distance)) = best {
        trace!("Offset {} resolved to '{}' at distance {}", offset, word, distance);
    }
    best.map(|(word, _)| word)
}

/// Parses a link target as left by the renderer's `filepos=` → `href=`
/// rewrite, e.g. `0000012345`, `"0000012345"` or `#0000012345`.
pub fn parse_link_target(link: &str) -> Option<u32> {
    let target = link
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_start_matches('#');
    if target.is_empty() || !target.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    target.parse().ok()
}
