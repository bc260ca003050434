//! Options inheritance and merging.
//!
//! Options are an opaque key-value configuration scoped to one test instance.
//! Each case layer's declared overrides are applied on top of whatever the
//! ancestor chain already accumulated; the most-derived layer wins on key
//! conflicts. The engine never validates keys or values.

use std::collections::BTreeMap;

/// Per-instance configuration mapping, opaque to the engine.
pub type FixtureOptions = BTreeMap<String, serde_json::Value>;

/// Returns `current` with `layer`'s entries overlaid key-by-key.
///
/// Neither input is modified; the caller stores the result back as the
/// instance's current option set.
pub fn merged(current: &FixtureOptions, layer: &FixtureOptions) -> FixtureOptions {
    let mut options = current.clone();
    for (key, value) in layer {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Convenience lookup for string-valued options.
pub fn as_str<'a>(options: &'a FixtureOptions, key: &str) -> Option<&'a str> {
    options.get(key).and_then(|value| value.as_str())
}
