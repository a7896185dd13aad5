//! Client-side windowing of an acquired collection into UI pages.
//!
//! Pages are 1-based. Nothing here fails: out-of-range input is clamped.

use std::ops::RangeInclusive;

/// Most numbered page buttons shown at once.
pub const VISIBLE_PAGE_BUTTONS: usize = 5;

/// `ceil(len / page_size)`, never less than one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Items `[(page - 1) * page_size, page * page_size)` clamped to `items`.
///
/// Page 0 is read as page 1; pages past the end are empty.
pub fn window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = page.saturating_mul(page_size).min(items.len());
    &items[start..end]
}

/// 1-based page containing the absolute `index`.
pub fn page_of(index: usize, page_size: usize) -> usize {
    index / page_size.max(1) + 1
}

/// Page change requested by a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    First,
    Previous,
    Next,
    Last,
    Number(usize),
}

/// Applies `request` to `current`, clamped to `1..=total`.
pub fn resolve_page(current: usize, total: usize, request: PageRequest) -> usize {
    let total = total.max(1);
    let target = match request {
        PageRequest::First => 1,
        PageRequest::Previous => current.saturating_sub(1),
        PageRequest::Next => current.saturating_add(1),
        PageRequest::Last => total,
        PageRequest::Number(n) => n,
    };
    target.clamp(1, total)
}

/// Numbered buttons to show around `page`: up to five, centred on the current
/// page and pinned to the first and last pages near the ends.
pub fn page_buttons(page: usize, total: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let page = page.clamp(1, total);
    let half = VISIBLE_PAGE_BUTTONS / 2;
    if total <= VISIBLE_PAGE_BUTTONS || page <= half + 1 {
        1..=total.min(VISIBLE_PAGE_BUTTONS)
    } else if page + half >= total {
        total + 1 - VISIBLE_PAGE_BUTTONS..=total
    } else {
        page - half..=page + half
    }
}
