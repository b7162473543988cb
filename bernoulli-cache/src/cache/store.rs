//! Append-only, index-addressable storage.
//!
//! Entries live in buckets of doubling size (32, 64, 128, ...). A bucket is
//! allocated once and never moved, so a reference handed out for index `i`
//! stays valid while later appends allocate new buckets. Slots are write-once.

use once_cell::sync::OnceCell;

const FIRST_BUCKET_BITS: u32 = 5;
const FIRST_BUCKET_LEN: usize = 1 << FIRST_BUCKET_BITS;
const BUCKET_COUNT: usize = (usize::BITS - FIRST_BUCKET_BITS) as usize;

type Bucket<T> = Box<[OnceCell<T>]>;

/// Write-once slots addressed by dense index.
pub struct AppendOnlyStore<T> {
    buckets: [OnceCell<Bucket<T>>; BUCKET_COUNT],
}

impl<T> AppendOnlyStore<T> {
    /// Create an empty store. No bucket is allocated until the first write.
    pub fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    /// Read the entry at `index`, if it has been written.
    pub fn get(&self, index: usize) -> Option<&T> {
        let (bucket, offset) = locate(index)?;
        self.buckets[bucket].get()?.get(offset)?.get()
    }

    /// Write the entry at `index`.
    ///
    /// Returns the value back if the slot was already written; published
    /// entries are never replaced.
    pub fn set(&self, index: usize, value: T) -> Result<(), T> {
        let Some((bucket, offset)) = locate(index) else {
            return Err(value);
        };
        let slots = self.buckets[bucket].get_or_init(|| new_bucket(bucket));
        slots[offset].set(value)
    }

    /// Number of slots currently allocated.
    pub fn allocated(&self) -> usize {
        self.buckets
            .iter()
            .filter_map(|b| b.get())
            .map(|b| b.len())
            .sum()
    }
}

impl<T> Default for AppendOnlyStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for AppendOnlyStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppendOnlyStore")
            .field("allocated", &self.allocated())
            .finish()
    }
}

fn new_bucket<T>(bucket: usize) -> Bucket<T> {
    let len = FIRST_BUCKET_LEN << bucket;
    (0..len).map(|_| OnceCell::new()).collect()
}

/// Map an index to (bucket, offset).
fn locate(index: usize) -> Option<(usize, usize)> {
    let biased = index.checked_add(FIRST_BUCKET_LEN)?;
    let bit = usize::BITS - 1 - biased.leading_zeros();
    let bucket = (bit - FIRST_BUCKET_BITS) as usize;
    let offset = biased - (1usize << bit);
    Some((bucket, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_bucket_boundaries() {
        assert_eq!(locate(0), Some((0, 0)));
        assert_eq!(locate(31), Some((0, 31)));
        assert_eq!(locate(32), Some((1, 0)));
        assert_eq!(locate(95), Some((1, 63)));
        assert_eq!(locate(96), Some((2, 0)));
        assert_eq!(locate(usize::MAX), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = AppendOnlyStore::new();
        assert!(store.get(0).is_none());
        for i in 0..200usize {
            assert!(store.set(i, i * 3).is_ok());
        }
        for i in 0..200usize {
            assert_eq!(store.get(i), Some(&(i * 3)));
        }
        assert!(store.get(200).is_none());
    }

    #[test]
    fn test_slots_are_write_once() {
        let store = AppendOnlyStore::new();
        assert!(store.set(5, "first").is_ok());
        assert_eq!(store.set(5, "second"), Err("second"));
        assert_eq!(store.get(5), Some(&"first"));
    }

    #[test]
    fn test_references_survive_growth() {
        let store = AppendOnlyStore::new();
        store.set(0, String::from("zero")).unwrap();
        let early = store.get(0).unwrap();
        for i in 1..1_000 {
            store.set(i, i.to_string()).unwrap();
        }
        assert_eq!(early, "zero");
        assert_eq!(store.allocated(), 32 + 64 + 128 + 256 + 512 + 1024);
    }

    #[test]
    fn test_lazy_bucket_allocation() {
        let store: AppendOnlyStore<u8> = AppendOnlyStore::new();
        assert_eq!(store.allocated(), 0);
        store.set(40, 1).unwrap();
        assert_eq!(store.allocated(), 64);
    }
}
