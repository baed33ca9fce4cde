//! Checks over ordered sequences

use std::collections::HashSet;
use std::hash::Hash;

/// Return the first item that occurs more than once
///
/// ```rust
/// use token_validation::find_duplicate;
///
/// assert_eq!(find_duplicate(&["he", "en", "he"]), Some(&"he"));
/// assert_eq!(find_duplicate(&["he", "en"]), None);
/// ```
pub fn find_duplicate<T: Eq + Hash>(items: &[T]) -> Option<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}

/// Return the first item whose key occurs more than once
///
/// The key may borrow from the item.
pub fn find_duplicate_by<'a, T, K, F>(items: &'a [T], mut key: F) -> Option<&'a T>
where
    K: Eq + Hash,
    F: FnMut(&'a T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(key(*item)))
}
