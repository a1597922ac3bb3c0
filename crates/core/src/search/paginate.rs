//! Pagination over characters followed by media.

use super::types::{CharacterRecord, MediaRecord, Page};
use super::DEFAULT_PAGE_LIMIT;

/// Number of pages needed for `total` items; `0` only when `total` is `0`.
///
/// A `limit` of `0` means `DEFAULT_PAGE_LIMIT`.
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(effective_limit(limit))
}

fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_PAGE_LIMIT
    } else {
        limit
    }
}

/// Slice page `page` (1-based) out of `characters ++ media`.
///
/// The combined sequence is never materialized: the page's index range is
/// split at `characters.len()` into a character range and a media range.
/// A page past the end yields empty collections; `total_pages` is still
/// reported for the full sequence. A `limit` of `0` means `DEFAULT_PAGE_LIMIT`.
pub fn paginate(
    characters: &[CharacterRecord],
    media: &[MediaRecord],
    page: usize,
    limit: usize,
) -> Page {
    let limit = effective_limit(limit);
    let total = characters.len() + media.len();
    let total_pages = total_pages(total, limit);

    let start = page.max(1).saturating_sub(1).saturating_mul(limit);
    if start >= total {
        return Page {
            characters: Vec::new(),
            media: Vec::new(),
            total_pages,
        };
    }
    let end = start.saturating_add(limit).min(total);

    let split = characters.len();
    let char_range = start.min(split)..end.min(split);
    let media_range = start.saturating_sub(split)..end.saturating_sub(split);

    Page {
        characters: characters[char_range].to_vec(),
        media: media[media_range].to_vec(),
        total_pages,
    }
}
