//! Page and selection state of the gallery view as a pure reducer.
//!
//! The state only stores indices; the acquired photos are passed in read-only
//! whenever a window or the selected record is needed.

use crate::pagination::{self, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Absolute index of the photo shown in the detail viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A new collection of `len` photos replaced the previous one.
    Loaded { len: usize },
    GoToPage(PageRequest),
    /// Open the photo at `window_index` within the current page.
    Open { window_index: usize },
    Close,
    Navigate(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryState {
    pub page: usize,
    pub page_size: usize,
    pub len: usize,
    pub selection: Option<Selection>,
}

impl GalleryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            len: 0,
            selection: None,
        }
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.len, self.page_size)
    }

    /// The current page of `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        pagination::window(items, self.page, self.page_size)
    }

    pub fn selected<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        self.selection.and_then(|sel| items.get(sel.index))
    }
}

pub fn reduce(state: GalleryState, action: Action) -> GalleryState {
    match action {
        Action::Loaded { len } => GalleryState {
            page: 1,
            len,
            selection: None,
            ..state
        },
        Action::GoToPage(request) => GalleryState {
            page: pagination::resolve_page(state.page, state.total_pages(), request),
            ..state
        },
        Action::Open { window_index } => {
            if window_index >= state.page_size {
                return state;
            }
            let index = (state.page.max(1) - 1) * state.page_size + window_index;
            if index >= state.len {
                return state;
            }
            GalleryState {
                selection: Some(Selection { index }),
                ..state
            }
        }
        Action::Close => GalleryState {
            selection: None,
            ..state
        },
        Action::Navigate(direction) => navigate(state, direction),
    }
}

fn navigate(state: GalleryState, direction: Direction) -> GalleryState {
    let len = state.len;
    let Some(Selection { index }) = state.selection else {
        return state;
    };
    if len == 0 {
        return state;
    }
    // Wraps at both ends.
    let index = match direction {
        Direction::Next => (index % len + 1) % len,
        Direction::Previous => (index % len + len - 1) % len,
    };
    GalleryState {
        page: pagination::page_of(index, state.page_size),
        selection: Some(Selection { index }),
        ..state
    }
}
