//! Wraparound position within the word list.

use crate::entry::WordList;
use crate::error::{BrowseError, Result};

/// Current index into a non-empty sequence of `len` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    /// Cursor at index 0. Fails with `EmptyCollection` when `len == 0`.
    pub fn new(len: usize) -> Result<Self> {
        Self::with_index(len, 0)
    }

    /// Cursor at `index`.
    pub fn with_index(len: usize, index: usize) -> Result<Self> {
        if len == 0 {
            return Err(BrowseError::EmptyCollection);
        }
        if index >= len {
            return Err(BrowseError::OutOfRange { index, len });
        }
        Ok(Self { index, len })
    }

    /// Cursor at the first entry of a word list, which is never empty.
    pub fn at_start(words: &WordList) -> Self {
        Self {
            index: 0,
            len: words.len(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true for a constructed cursor.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step forward, wrapping from the last entry to the first.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    /// Step back, wrapping from the first entry to the last.
    pub fn retreat(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jump to `index`. Out-of-range targets leave the cursor untouched.
    pub fn jump_to(&mut self, index: usize) -> Result<usize> {
        if index >= self.len {
            return Err(BrowseError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_rejected() {
        assert!(matches!(Cursor::new(0), Err(BrowseError::EmptyCollection)));
        assert!(matches!(
            Cursor::with_index(0, 0),
            Err(BrowseError::EmptyCollection)
        ));
    }

    #[test]
    fn wraps_both_ways() {
        let mut c = Cursor::new(3).unwrap();
        assert_eq!(c.retreat(), 2);
        assert_eq!(c.advance(), 0);
        assert_eq!(c.advance(), 1);
        assert_eq!(c.advance(), 2);
        assert_eq!(c.advance(), 0);
    }

    #[test]
    fn advance_n_times_is_identity() {
        for len in 1..8 {
            for start in 0..len {
                let mut c = Cursor::with_index(len, start).unwrap();
                for _ in 0..len {
                    c.advance();
                }
                assert_eq!(c.index(), start);
            }
        }
    }

    #[test]
    fn retreat_inverts_advance() {
        let mut c = Cursor::with_index(5, 4).unwrap();
        c.advance();
        c.retreat();
        assert_eq!(c.index(), 4);
        c.retreat();
        c.advance();
        assert_eq!(c.index(), 4);
    }

    #[test]
    fn single_entry_stays_put() {
        let mut c = Cursor::new(1).unwrap();
        assert_eq!(c.advance(), 0);
        assert_eq!(c.retreat(), 0);
    }

    #[test]
    fn jump_out_of_range_keeps_index() {
        let mut c = Cursor::with_index(4, 2).unwrap();
        assert!(matches!(
            c.jump_to(4),
            Err(BrowseError::OutOfRange { index: 4, len: 4 })
        ));
        assert_eq!(c.index(), 2);
        assert_eq!(c.jump_to(3).unwrap(), 3);
    }
}
