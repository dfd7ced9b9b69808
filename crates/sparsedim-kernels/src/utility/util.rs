//! Utility constants and the memo table used by value-mapping kernels

use sparsedim_core::Element;

/// Below this many stored entries kernels walk slices sequentially.
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;

/// Open-addressing table from an element's bit pattern to a cached result.
/// Used to apply a pure function once per distinct input value.
pub struct MemoMap<T> {
    keys: Vec<u64>,
    vals: Vec<T>,
    used: Vec<bool>,
    mask: usize,
    len: usize,
}

impl<T: Element> MemoMap<T> {
    /// Create a new map with at least the given capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        let cap2 = cap.next_power_of_two().max(16);
        Self {
            keys: vec![0u64; cap2],
            vals: vec![T::zero(); cap2],
            used: vec![false; cap2],
            mask: cap2 - 1,
            len: 0,
        }
    }

    /// Hash function for keys (multiplicative, avalanche)
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    const fn hash(key: u64) -> usize {
        (key.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 16) as usize
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cached result for `input`, computing and storing `f(input)` on a miss.
    /// Grows the map if load factor exceeds 0.7.
    pub fn get_or_insert_with(&mut self, input: T, f: impl FnOnce(T) -> T) -> T {
        let key = input.to_bits();
        let mut idx = Self::hash(key) & self.mask;
        while self.used[idx] {
            if self.keys[idx] == key {
                return self.vals[idx];
            }
            idx = (idx + 1) & self.mask;
        }
        let out = f(input);
        self.used[idx] = true;
        self.keys[idx] = key;
        self.vals[idx] = out;
        self.len += 1;
        if self.len * 10 > self.keys.len() * 7 {
            self.grow();
        }
        out
    }

    /// Double the capacity, rehashing all entries.
    fn grow(&mut self) {
        let new_cap = self.keys.len() * 2;
        let mut keys = vec![0u64; new_cap];
        let mut vals = vec![T::zero(); new_cap];
        let mut used = vec![false; new_cap];
        let mask = new_cap - 1;
        for i in (0..self.keys.len()).filter(|&i| self.used[i]) {
            let mut idx = Self::hash(self.keys[i]) & mask;
            while used[idx] {
                idx = (idx + 1) & mask;
            }
            used[idx] = true;
            keys[idx] = self.keys[i];
            vals[idx] = self.vals[i];
        }
        self.keys = keys;
        self.vals = vals;
        self.used = used;
        self.mask = mask;
    }
}
