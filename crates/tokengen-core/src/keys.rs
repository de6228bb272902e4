//! Discovery ordering of token keys within one file.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

/// Trailing numeric variant: `gray-400` → (`gray`, 400).
static RE_NUMERIC_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)-(\d+)$").unwrap());

/// Split a key into its prefix and numeric suffix (`-1` when absent).
pub fn split_key(key: &str) -> (&str, i64) {
    if let Some(caps) = RE_NUMERIC_SUFFIX.captures(key) {
        if let (Some(prefix), Ok(n)) = (caps.get(1), caps[2].parse::<i64>()) {
            return (prefix.as_str(), n);
        }
    }
    (key, -1)
}

/// Compare keys by prefix, then numerically by suffix.
///
/// `gray` < `gray-2` < `gray-10`.
pub fn cmpkeys(a: &str, b: &str) -> Ordering {
    let (pa, na) = split_key(a);
    let (pb, nb) = split_key(b);
    pa.cmp(pb).then(na.cmp(&nb))
}

/// Sort keys in discovery order.
pub fn sort_keys<S: AsRef<str>>(keys: &mut [S]) {
    keys.sort_by(|a, b| cmpkeys(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("gray-400"), ("gray", 400));
        assert_eq!(split_key("gray"), ("gray", -1));
        assert_eq!(split_key("spacing-x-100"), ("spacing-x", 100));
        assert_eq!(split_key("font-size-xl"), ("font-size-xl", -1));
    }

    #[test]
    fn test_numeric_suffix_sorts_numerically() {
        let mut keys = vec!["gray-10", "gray-2", "gray"];
        sort_keys(&mut keys);
        assert_eq!(keys, vec!["gray", "gray-2", "gray-10"]);
    }

    #[test]
    fn test_prefix_dominates() {
        let mut keys = vec!["red-100", "blue-900", "blue-50", "blue"];
        sort_keys(&mut keys);
        assert_eq!(keys, vec!["blue", "blue-50", "blue-900", "red-100"]);
    }

    #[test]
    fn test_overflowing_suffix_treated_as_plain_key() {
        let huge = "gray-99999999999999999999";
        assert_eq!(split_key(huge), (huge, -1));
    }
}
