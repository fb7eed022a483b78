// Copyright 2026 the Keyplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pages, rows, and the builder that validates them.

use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::key::{Key, KeyId, KeyKind};

/// Ordered list of key references.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    keys: SmallVec<[KeyId; 12]>,
}

impl Row {
    /// Key identities in left-to-right order.
    pub fn keys(&self) -> &[KeyId] {
        &self.keys
    }

    /// Number of keys in the row.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the row has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Ordered list of rows, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    rows: Vec<Row>,
}

impl Page {
    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of the longest row.
    pub fn max_keys_per_row(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Returns `true` if `id` appears anywhere on this page.
    pub fn contains(&self, id: KeyId) -> bool {
        self.rows.iter().any(|row| row.keys.contains(&id))
    }
}

/// A key placed at a concrete position of a page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Page index.
    pub page: usize,
    /// Row index within the page.
    pub row: usize,
    /// Position within the row.
    pub index: usize,
    /// Key placed in this slot.
    pub key: KeyId,
}

/// Immutable key table: keys plus the pages that arrange them.
#[derive(Clone, Debug)]
pub struct Keyboard {
    keys: Vec<Key>,
    pages: Vec<Page>,
}

impl Keyboard {
    /// Content of the key with identity `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different builder and is out of range.
    pub fn key(&self, id: KeyId) -> &Key {
        &self.keys[id.index()]
    }

    /// Content of the key with identity `id`, if it belongs to this keyboard.
    pub fn get(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(id.index())
    }

    /// Page at `index`.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// All pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of distinct key identities.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Every slot of `page` in row-major order. Empty if the page does not exist.
    pub fn slots(&self, page: usize) -> impl Iterator<Item = SlotRef> + '_ {
        self.pages
            .get(page)
            .into_iter()
            .flat_map(|p| p.rows.iter().enumerate())
            .flat_map(move |(row, r)| {
                r.keys.iter().enumerate().map(move |(index, &key)| SlotRef {
                    page,
                    row,
                    index,
                    key,
                })
            })
    }

    /// Indices of the pages on which `id` appears.
    pub fn pages_containing(&self, id: KeyId) -> impl Iterator<Item = usize> + '_ {
        self.pages
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.contains(id))
            .map(|(i, _)| i)
    }

    /// Position of `id` on `page`, if present.
    pub fn locate(&self, page: usize, id: KeyId) -> Option<SlotRef> {
        self.slots(page).find(|slot| slot.key == id)
    }
}

/// Errors reported by [`KeyboardBuilder::build`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The builder holds no pages.
    NoPages,
    /// A page has no rows.
    EmptyPage {
        /// Offending page.
        page: usize,
    },
    /// A row has no keys.
    EmptyRow {
        /// Page holding the row.
        page: usize,
        /// Offending row.
        row: usize,
    },
    /// The same identity appears twice on one page.
    DuplicateKeyInPage {
        /// Repeated key.
        key: KeyId,
        /// Page on which it repeats.
        page: usize,
    },
    /// A row references an identity this builder never issued.
    UnknownKey {
        /// Foreign key.
        key: KeyId,
    },
    /// A mode-change key has no target page.
    MissingTargetPage {
        /// Offending key.
        key: KeyId,
    },
    /// A mode-change key targets a page that does not exist.
    TargetPageOutOfRange {
        /// Offending key.
        key: KeyId,
        /// Requested page.
        target: usize,
        /// Number of pages available.
        pages: usize,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPages => write!(f, "keyboard has no pages"),
            Self::EmptyPage { page } => write!(f, "page {page} has no rows"),
            Self::EmptyRow { page, row } => write!(f, "row {row} of page {page} has no keys"),
            Self::DuplicateKeyInPage { key, page } => {
                write!(f, "key {} appears more than once on page {page}", key.index())
            }
            Self::UnknownKey { key } => write!(f, "key {} was not issued here", key.index()),
            Self::MissingTargetPage { key } => {
                write!(f, "mode-change key {} has no target page", key.index())
            }
            Self::TargetPageOutOfRange { key, target, pages } => write!(
                f,
                "mode-change key {} targets page {target} but only {pages} pages exist",
                key.index()
            ),
        }
    }
}

impl core::error::Error for TableError {}

/// Incrementally assembles a [`Keyboard`].
///
/// Rows and pages are created on demand: adding a key at `(row, page)` grows the
/// page list and the page's row list as needed. Gaps left behind are reported as
/// empty pages or rows by [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct KeyboardBuilder {
    keys: Vec<Key>,
    pages: Vec<Page>,
}

impl KeyboardBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key` with a fresh identity at the end of `row` on `page`.
    pub fn add_key(&mut self, key: Key, row: usize, page: usize) -> KeyId {
        let id = KeyId(u32::try_from(self.keys.len()).unwrap_or(u32::MAX));
        self.keys.push(key);
        self.place(id, row, page);
        id
    }

    /// Places an already issued identity again at the end of `row` on `page`.
    ///
    /// The slot shares content and identity with every other placement of `id`.
    pub fn share_key(&mut self, id: KeyId, row: usize, page: usize) {
        self.place(id, row, page);
    }

    /// Places a copy of `id`'s content under a fresh identity.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this builder.
    pub fn copy_key(&mut self, id: KeyId, row: usize, page: usize) -> KeyId {
        let key = self.keys[id.index()].clone();
        self.add_key(key, row, page)
    }

    /// Content of an issued key, for adjusting it after placement.
    pub fn key_mut(&mut self, id: KeyId) -> Option<&mut Key> {
        self.keys.get_mut(id.index())
    }

    /// Validates and freezes the table.
    pub fn build(self) -> Result<Keyboard, TableError> {
        if self.pages.is_empty() {
            return Err(TableError::NoPages);
        }
        let mut seen: Vec<bool> = Vec::new();
        for (p, page) in self.pages.iter().enumerate() {
            if page.rows.is_empty() {
                return Err(TableError::EmptyPage { page: p });
            }
            seen.clear();
            seen.resize(self.keys.len(), false);
            for (r, row) in page.rows.iter().enumerate() {
                if row.keys.is_empty() {
                    return Err(TableError::EmptyRow { page: p, row: r });
                }
                for &id in &row.keys {
                    let Some(slot) = seen.get_mut(id.index()) else {
                        return Err(TableError::UnknownKey { key: id });
                    };
                    if *slot {
                        return Err(TableError::DuplicateKeyInPage { key: id, page: p });
                    }
                    *slot = true;
                }
            }
        }
        for (i, key) in self.keys.iter().enumerate() {
            if key.kind != KeyKind::ModeChange {
                continue;
            }
            let id = KeyId(i as u32);
            match key.target_page {
                None => return Err(TableError::MissingTargetPage { key: id }),
                Some(target) if target >= self.pages.len() => {
                    return Err(TableError::TargetPageOutOfRange {
                        key: id,
                        target,
                        pages: self.pages.len(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(Keyboard {
            keys: self.keys,
            pages: self.pages,
        })
    }

    fn place(&mut self, id: KeyId, row: usize, page: usize) {
        if self.pages.len() <= page {
            self.pages.resize_with(page + 1, Page::default);
        }
        let rows = &mut self.pages[page].rows;
        if rows.len() <= row {
            rows.resize_with(row + 1, Row::default);
        }
        rows[row].keys.push(id);
    }
}
