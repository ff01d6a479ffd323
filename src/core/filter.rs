//! Behaviour shared by membership filter variants.
//!
//! # Guarantees
//!
//! 1. **No false negatives**: after a successful `add(x)`, `contains(x)` is `true`
//! 2. **Bounded false positives** while the filter is within its capacity
//! 3. **Exclusive mutation**: insertion takes `&mut self`; wrap in
//!    `Arc<Mutex<_>>` for shared writers
//!
//! Elements are identified by their [`HashToken`] bytes, not by
//! `std::hash::Hash`, so the generic methods accept anything with a stable
//! byte rendering (`str`, `[u8]`, integers, user types).

use crate::error::Result;
use crate::hash::HashToken;

/// Probabilistic set membership with a fixed capacity.
///
/// # Examples
///
/// ```
/// use slicebloom::core::MembershipFilter;
/// use slicebloom::SlicedBloomFilter;
///
/// fn seen_before<F: MembershipFilter>(filter: &mut F, key: &str) -> bool {
///     filter.add(key).unwrap_or(true)
/// }
///
/// let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
/// assert!(!seen_before(&mut filter, "alice"));
/// assert!(seen_before(&mut filter, "alice"));
/// ```
pub trait MembershipFilter {
    /// `false` means the element was definitely never added; `true` means it
    /// probably was.
    #[must_use]
    fn contains<T: HashToken + ?Sized>(&self, element: &T) -> bool;

    /// Add an element unless it is probably present already.
    ///
    /// Returns `Ok(true)` if the element was reported present (nothing
    /// changed) and `Ok(false)` if it was inserted.
    ///
    /// # Errors
    ///
    /// Returns `FilterFull` when the insertion count already exceeds the
    /// capacity.
    fn add<T: HashToken + ?Sized>(&mut self, element: &T) -> Result<bool>;

    /// Number of recorded insertions.
    #[must_use]
    fn len(&self) -> usize;

    /// `true` if nothing has been inserted.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    #[must_use]
    fn capacity(&self) -> usize;

    /// Configured false positive target.
    #[must_use]
    fn false_positive_rate(&self) -> f64;

    /// Total number of bits allocated.
    #[must_use]
    fn bit_count(&self) -> usize;

    /// Number of hash functions (bits checked) per element.
    #[must_use]
    fn hash_count(&self) -> usize;

    /// `true` if every element is probably present.
    #[must_use]
    fn contains_all<'a, T, I>(&self, elements: I) -> bool
    where
        T: HashToken + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// `true` if at least one element is probably present.
    #[must_use]
    fn contains_any<'a, T, I>(&self, elements: I) -> bool
    where
        T: HashToken + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        elements.into_iter().any(|e| self.contains(e))
    }
}
