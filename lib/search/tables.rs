use crate::chess::Zobrist;
use crate::search::Transposition;
use tracing::debug;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
struct Slot {
    key: Zobrist,
    tpos: Option<Transposition>,
}

impl Slot {
    #[inline(always)]
    fn matches(&self, key: Zobrist) -> bool {
        self.tpos.is_some() && self.key == key
    }
}

/// Slots sharing the same index.
type Bucket = [Slot; 2];

/// A fixed-capacity [transposition table] with depth-preferred replacement.
///
/// [transposition table]: https://www.chessprogramming.org/Transposition_Table
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    buckets: Vec<Bucket>,
    len: usize,
}

impl TranspositionTable {
    /// The largest power of two number of buckets that fit in `size` bytes.
    #[inline(always)]
    fn size_to_len(size: usize) -> usize {
        match size / size_of::<Bucket>() {
            0 => 0,
            n => 1 << n.ilog2(),
        }
    }

    /// Constructs a table with up to `size` bytes.
    pub fn new(size: usize) -> Self {
        let buckets = vec![Bucket::default(); Self::size_to_len(size)];
        let capacity = buckets.len() * 2;
        debug!(size, capacity, "allocated transposition table");
        TranspositionTable { buckets, len: 0 }
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.buckets.fill(Bucket::default());
        self.len = 0;
        debug!("cleared transposition table");
    }

    /// The maximum number of entries.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * 2
    }

    /// The number of entries.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table has no entries.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn index(&self, key: Zobrist) -> usize {
        (key & (self.buckets.len() as u64 - 1)) as usize
    }

    /// Stores a [`Transposition`] for a position.
    ///
    /// An existing entry for the same key is overwritten, otherwise the shallower of the two
    /// slots in the bucket is replaced if both are taken.
    pub fn store(&mut self, key: Zobrist, tpos: Transposition) {
        if self.buckets.is_empty() {
            return;
        }

        let idx = self.index(key);
        let bucket = &mut self.buckets[idx];

        let slot = if let Some(i) = bucket.iter().position(|s| s.matches(key)) {
            i
        } else if let Some(i) = bucket.iter().position(|s| s.tpos.is_none()) {
            self.len += 1;
            i
        } else {
            let depth = |s: &Slot| s.tpos.map(|t| t.depth());
            usize::from(depth(&bucket[0]) > depth(&bucket[1]))
        };

        bucket[slot] = Slot {
            key,
            tpos: Some(tpos),
        };
    }

    /// Loads the [`Transposition`] stored for a position, if any.
    #[inline(always)]
    pub fn load(&self, key: Zobrist) -> Option<Transposition> {
        if self.buckets.is_empty() {
            return None;
        }

        let bucket = &self.buckets[self.index(key)];
        bucket.iter().find(|s| s.matches(key)).and_then(|s| s.tpos)
    }
}
