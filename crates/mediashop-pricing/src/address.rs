//! # Address Classifier
//!
//! Decides whether a free-text city denotes Hanoi, the only city with rush
//! delivery.
//!
//! ## Normalization Pipeline
//! ```text
//! "  HÀ   NỘI  "
//!      │ lowercase
//!      ▼
//! "  hà   nội  "
//!      │ trim
//!      ▼
//! "hà   nội"
//!      │ NFD + strip U+0300..=U+036F
//!      ▼
//! "ha   noi"
//!      │ collapse whitespace runs
//!      ▼
//! "ha noi"  ──► exact match against the accepted spellings
//! ```
//!
//! Trimming happens once, before decomposition. A space that only becomes
//! trailing after a combining mark is stripped (`"Hanoi \u{301}"`) stays, so
//! such input does not match.
//!
//! Matching is whole-string equality. "Hanoi Street" or "New Hanoi" are other
//! places, not Hanoi.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::types::ShippingAddress;

/// Accepted spellings, before normalization.
const HANOI_SPELLINGS: &[&str] = &[
    "hanoi",
    "ha noi",
    "hn",
    "hà nội",
    "hà noi",
    "hanoi city",
    "ha noi city",
];

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Combining Diacritical Marks block.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Normalizes a city for comparison.
///
/// ## Example
/// ```rust
/// use mediashop_pricing::address::normalize_city;
///
/// assert_eq!(normalize_city("  Hà   Nội  "), "ha noi");
/// ```
pub fn normalize_city(city: &str) -> String {
    let stripped: String = city
        .to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    WHITESPACE_RUN_RE.replace_all(&stripped, " ").into_owned()
}

/// Returns `true` when `city` is one of the accepted Hanoi spellings.
///
/// Never fails: empty or whitespace-only input is simply not Hanoi.
///
/// ## Example
/// ```rust
/// use mediashop_pricing::is_hanoi_city;
///
/// assert!(is_hanoi_city("Hà Nội"));
/// assert!(is_hanoi_city("HN"));
/// assert!(!is_hanoi_city("Hanoi Street"));
/// ```
pub fn is_hanoi_city(city: &str) -> bool {
    let normalized = normalize_city(city);
    if normalized.is_empty() {
        return false;
    }

    HANOI_SPELLINGS
        .iter()
        .any(|spelling| normalize_city(spelling) == normalized)
}

/// Whether an address qualifies for rush delivery. A missing city never does.
pub fn is_address_rush_eligible(address: &ShippingAddress) -> bool {
    address.city().is_some_and(is_hanoi_city)
}

/// Quick availability check for a bare city string.
pub fn is_rush_delivery_available(city: &str) -> bool {
    is_address_rush_eligible(&ShippingAddress::in_city(city))
}

// =============================================================================
// Unit Tests
// =============================================================================
