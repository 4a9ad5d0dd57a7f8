//! Magnitude-only semantic version ordering
//!
//! Detected versions ("v3.17.1", "v2") and scraped range bounds ("4.1.3")
//! mix `v`-prefixed and bare tokens, so both sides are normalized before
//! comparison. Components are compared left to right, numeric against
//! numeric, with missing components treated as zero.

use std::cmp::Ordering;

/// Compare two version strings by magnitude.
pub fn compare(a: &str, b: &str) -> Ordering {
    let a_parts = components(a);
    let b_parts = components(b);
    let max_len = a_parts.len().max(b_parts.len());

    for i in 0..max_len {
        let a_part = a_parts.get(i).cloned().unwrap_or(Component::Numeric(0));
        let b_part = b_parts.get(i).cloned().unwrap_or(Component::Numeric(0));

        let ordering = match (a_part, b_part) {
            (Component::Numeric(a_num), Component::Numeric(b_num)) => a_num.cmp(&b_num),
            (Component::Alpha(a_str), Component::Alpha(b_str)) => a_str.cmp(&b_str),
            (Component::Numeric(_), Component::Alpha(_)) => Ordering::Less,
            (Component::Alpha(_), Component::Numeric(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// `a <= b` under magnitude ordering.
pub fn less_or_equal(a: &str, b: &str) -> bool {
    compare(a, b) != Ordering::Greater
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Component {
    Numeric(u64),
    Alpha(String),
}

fn components(version: &str) -> Vec<Component> {
    let version = strip_v_prefix(version);
    let mut parts = Vec::new();
    let mut current_num = String::new();
    let mut current_alpha = String::new();

    let mut flush_num = |parts: &mut Vec<Component>, num: &mut String| {
        if !num.is_empty() {
            if let Ok(n) = num.parse::<u64>() {
                parts.push(Component::Numeric(n));
            }
            num.clear();
        }
    };

    for c in version.chars() {
        if c.is_ascii_digit() {
            if !current_alpha.is_empty() {
                parts.push(Component::Alpha(current_alpha.clone()));
                current_alpha.clear();
            }
            current_num.push(c);
        } else if c.is_alphabetic() {
            flush_num(&mut parts, &mut current_num);
            current_alpha.push(c);
        } else {
            flush_num(&mut parts, &mut current_num);
            if !current_alpha.is_empty() {
                parts.push(Component::Alpha(current_alpha.clone()));
                current_alpha.clear();
            }
        }
    }

    flush_num(&mut parts, &mut current_num);
    if !current_alpha.is_empty() {
        parts.push(Component::Alpha(current_alpha));
    }

    parts
}

/// Strip a leading `v`/`V` only when it prefixes a digit, so release tags
/// and bare versions order together.
fn strip_v_prefix(version: &str) -> &str {
    match version.strip_prefix(['v', 'V']) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_basic() {
        assert_eq!(compare("1.0", "1.0"), Ordering::Equal);
        assert_eq!(compare("1.0", "2.0"), Ordering::Less);
        assert_eq!(compare("2.0", "1.0"), Ordering::Greater);
        assert_eq!(compare("1.0.1", "1.0"), Ordering::Greater);
        assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_v_prefix_mixed() {
        assert_eq!(compare("v1.2", "1.2"), Ordering::Equal);
        assert_eq!(compare("v4.0", "4.1.3"), Ordering::Less);
        assert_eq!(compare("4.11.1", "v4.1.3"), Ordering::Greater);
        assert_eq!(compare("v1", "v2"), Ordering::Less);
    }

    #[test]
    fn test_compare_short_tokens() {
        // Degraded labels like "v2"/"v3" still order against full versions.
        assert_eq!(compare("v2", "2.2.9"), Ordering::Less);
        assert_eq!(compare("v3", "2.2.9"), Ordering::Greater);
    }

    #[test]
    fn test_less_or_equal() {
        assert!(less_or_equal("v1", "v2"));
        assert!(less_or_equal("v2", "v2"));
        assert!(!less_or_equal("v2", "v1"));
    }

    #[test]
    fn test_minimum_by_version() {
        let tags = ["v1.3", "v1.2", "v1.4"];
        let earliest = tags.iter().min_by(|a, b| compare(a, b)).unwrap();
        assert_eq!(*earliest, "v1.2");
    }
}
