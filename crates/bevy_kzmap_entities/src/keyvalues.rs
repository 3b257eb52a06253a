//! Entity keyvalue bags.
//!
//! Map compilers describe every placed entity as a flat list of string
//! key-value pairs. [`EntityKeyValues`] carries one entity's pairs and
//! provides the typed accessors consumers expect from an engine keyvalue
//! store: a missing or malformed value falls back to a caller-supplied
//! default instead of failing.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

const KEY_CLASSNAME: &str = "classname";
const KEY_TARGETNAME: &str = "targetname";
const KEY_HAMMER_ID: &str = "hammerUniqueId";
const KEY_ORIGIN: &str = "origin";
const KEY_ANGLES: &str = "angles";

/// Opaque key-value store for one spawned map entity.
///
/// # Example
///
/// ```rust
/// use bevy_kzmap_entities::keyvalues::EntityKeyValues;
///
/// let kv: EntityKeyValues = [
///     ("classname", "trigger_multiple"),
///     ("timer_trigger_type", "10"),
///     ("timer_teleport_delay", "0.5"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(kv.classname(), "trigger_multiple");
/// assert_eq!(kv.get_i32("timer_trigger_type", 0), 10);
/// assert_eq!(kv.get_f32("timer_teleport_delay", 0.0), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntityKeyValues {
    values: HashMap<String, String>,
}

impl EntityKeyValues {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a key-value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Chainable insert, mostly useful when building bags by hand.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw string value for `key`, or the empty string when absent.
    pub fn get_str(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Integer value for `key`, or `default` when absent or malformed.
    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        self.values
            .get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Float value for `key`, or `default` when absent or malformed.
    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        self.values
            .get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Boolean value for `key`. Accepts `1` and `true` (any case); anything
    /// else, including an absent key, is `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        let value = self.get_str(key).trim();
        value == "1" || value.eq_ignore_ascii_case("true")
    }

    /// Vector value for `key` in the `"x y z"` format map compilers emit,
    /// or [`Vec3::ZERO`] when absent or malformed.
    pub fn get_vec3(&self, key: &str) -> Vec3 {
        let value = self.get_str(key);
        let mut parts = value.split_whitespace();
        let parsed = (|| {
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            let z = parts.next()?.parse().ok()?;
            Some(Vec3::new(x, y, z))
        })();
        parsed.unwrap_or(Vec3::ZERO)
    }

    /// The entity's classname, or the empty string.
    pub fn classname(&self) -> &str {
        self.get_str(KEY_CLASSNAME)
    }

    /// The entity's targetname, or the empty string.
    pub fn targetname(&self) -> &str {
        self.get_str(KEY_TARGETNAME)
    }

    /// The designer-assigned authoring id, `-1` when the compiler omitted it.
    pub fn hammer_id(&self) -> i32 {
        self.get_i32(KEY_HAMMER_ID, -1)
    }

    /// World position of the entity. Used only for diagnostics.
    pub fn origin(&self) -> Vec3 {
        self.get_vec3(KEY_ORIGIN)
    }

    /// Orientation of the entity as pitch/yaw/roll degrees.
    pub fn angles(&self) -> Vec3 {
        self.get_vec3(KEY_ANGLES)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EntityKeyValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntityKeyValues {
        [
            ("classname", "trigger_multiple"),
            ("targetname", "timer_startzone"),
            ("hammerUniqueId", "48"),
            ("origin", "1792.0 768.0 -416.0"),
            ("timer_trigger_type", "10"),
            ("timer_teleport_delay", "0.25"),
            ("timer_teleport_relative", "true"),
            ("timer_modifier_enable_slide", "0"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_str_defaults_to_empty() {
        let kv = sample();
        assert_eq!(kv.get_str("timer_course_name"), "");
        assert_eq!(kv.get_str("classname"), "trigger_multiple");
    }

    #[test]
    fn test_i32_parse_and_default() {
        let kv = sample();
        assert_eq!(kv.get_i32("timer_trigger_type", 0), 10);
        assert_eq!(kv.get_i32("missing", -1), -1);
        assert_eq!(kv.get_i32("origin", 7), 7); // not an integer
    }

    #[test]
    fn test_f32_parse_and_default() {
        let kv = sample();
        assert_eq!(kv.get_f32("timer_teleport_delay", 0.0), 0.25);
        assert_eq!(kv.get_f32("missing", 1.5), 1.5);
    }

    #[test]
    fn test_bool_accepts_one_and_true() {
        let kv = sample();
        assert!(kv.get_bool("timer_teleport_relative"));
        assert!(!kv.get_bool("timer_modifier_enable_slide"));
        assert!(!kv.get_bool("missing"));

        let kv = EntityKeyValues::new().with("flag", "TRUE");
        assert!(kv.get_bool("flag"));
    }

    #[test]
    fn test_vec3_parse_and_default() {
        let kv = sample();
        assert_eq!(kv.origin(), Vec3::new(1792.0, 768.0, -416.0));
        assert_eq!(kv.get_vec3("missing"), Vec3::ZERO);
        let kv = EntityKeyValues::new().with("origin", "1 2");
        assert_eq!(kv.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_hammer_id_default() {
        assert_eq!(EntityKeyValues::new().hammer_id(), -1);
        assert_eq!(sample().hammer_id(), 48);
    }
}
