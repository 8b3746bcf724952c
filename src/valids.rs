const WORD_BITS: usize = 64;

/// Mapping of valid jump destination from code.
///
/// Bit `i % 64` of word `i / 64` is set when byte `i` of the code is a
/// `JUMPDEST` instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Valids {
    words: Vec<u64>,
    len: usize,
}

impl Valids {
    /// Create an empty mapping for code of `len` bytes.
    pub(crate) fn with_len(len: usize) -> Self {
        Valids {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Marks `position` as a valid jump destination.
    pub(crate) fn set(&mut self, position: usize) {
        debug_assert!(position < self.len);
        self.words[position / WORD_BITS] |= 1 << (position % WORD_BITS);
    }

    /// Get the length of the valid mapping. This is the same as the
    /// code bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the valids list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the position is a valid jump destination. If
    /// not, returns `false`.
    pub fn is_valid(&self, position: usize) -> bool {
        if position >= self.len {
            return false;
        }

        self.words[position / WORD_BITS] & (1 << (position % WORD_BITS)) != 0
    }

    /// The packed bitmap, `ceil(len / 64)` words.
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Positions of valid jump destinations, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |position| self.is_valid(*position))
    }

    /// Number of valid jump destinations.
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }
}
