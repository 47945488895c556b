//! Cache Key Generation
//!
//! Derives a deterministic, human-readable cache key from a base identifier
//! and an optional set of query parameters.
//!
//! # Design
//!
//! - Absent parameters are modeled as `Option::None` and dropped before
//!   rendering; a present-but-empty string value is kept.
//! - Remaining parameters are sorted by key with a total, locale-independent
//!   byte ordering, so two set-equal parameter maps always render the same
//!   key regardless of iteration order.
//! - Rendering is `base?k1=v1&k2=v2`; keys are not hashed or percent-encoded
//!   (they identify internal cache slots, not URLs).

use std::collections::BTreeMap;
use std::fmt;

/// A query parameter value
///
/// Covers the shapes storefront call sites pass: strings (category, sort
/// order), integers (page, limit), and flags (in-stock only).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Generate a deterministic cache key from a base identifier and parameters
///
/// Parameters with a `None` value are dropped. If no parameters remain, the
/// base is returned unchanged (no trailing `?`), so an all-absent parameter
/// list and an empty one generate the same key. A duplicated parameter name
/// keeps the last value.
pub fn generate_key(base: &str, params: &[(&str, Option<ParamValue>)]) -> String {
    // BTreeMap gives the total byte ordering and de-duplicates names
    let present: BTreeMap<&str, &ParamValue> = params
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (*name, v)))
        .collect();

    if present.is_empty() {
        return base.to_string();
    }

    let rendered: Vec<String> = present
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    format!("{}?{}", base, rendered.join("&"))
}

// =============================================================================
// Tests
// =============================================================================
