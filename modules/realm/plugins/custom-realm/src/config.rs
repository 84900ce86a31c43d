//! Configuration for the custom realm.
//!
//! The host hands the realm its settings slice as a flat snapshot of dotted
//! keys, already resolved from whatever files and environment overlays the
//! host reads:
//!
//! ```text
//! type                 = custom
//! order                = 0
//! enabled              = true
//! users.john.password  = doe
//! users.john.roles     = user
//! users.jane.password  = test
//! users.jane.roles     = [user, admin]
//! ```
//!
//! A key defined more than once keeps its last definition.

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::ConfigError;

/// Realm type identifier hosts use to pick this implementation.
pub const REALM_TYPE: &str = "custom";

pub(crate) const TYPE_KEY: &str = "type";
pub(crate) const ORDER_KEY: &str = "order";
pub(crate) const ENABLED_KEY: &str = "enabled";
pub(crate) const USERS_PREFIX: &str = "users.";
pub(crate) const PASSWORD_FIELD: &str = "password";
pub(crate) const ROLES_FIELD: &str = "roles";

/// A single setting value. Zeroized on drop since it may hold a cleartext
/// password; `Debug` shows only the shape, never the contents.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub enum SettingValue {
    Single(String),
    List(Vec<String>),
}

impl SettingValue {
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl fmt::Debug for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(_) => f.write_str("Single(..)"),
            Self::List(values) => write!(f, "List(<{} values>)", values.len()),
        }
    }
}

/// Ordered snapshot of realm settings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RealmSettings {
    entries: Vec<(String, SettingValue)>,
}

impl RealmSettings {
    #[must_use]
    pub fn builder() -> RealmSettingsBuilder {
        RealmSettingsBuilder::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a snapshot from a JSON document.
    ///
    /// Nested objects are flattened into dotted keys, so
    /// `{"users": {"john": {"password": "doe"}}}` and
    /// `{"users.john.password": "doe"}` are equivalent. Numbers and booleans
    /// are kept in their textual form.
    ///
    /// The snapshot holds its own copies of every value. The borrowed
    /// `document` is left untouched, so a caller holding passwords in it is
    /// responsible for wiping it; the `Deserialize` impl does this for the
    /// document it parses.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the root is not an object and
    /// `InvalidValue` for `null` values or lists holding non-scalar elements.
    pub fn from_json(document: &Value) -> Result<Self, ConfigError> {
        let Value::Object(root) = document else {
            return Err(ConfigError::MalformedDocument(
                "settings root must be an object".to_owned(),
            ));
        };

        let mut builder = Self::builder();
        for (key, value) in root {
            builder = flatten(key, value, builder)?;
        }
        Ok(builder.build())
    }
}

impl fmt::Debug for RealmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.entries {
            if key.starts_with(USERS_PREFIX) && key.ends_with(PASSWORD_FIELD) {
                map.entry(key, &"[REDACTED]");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl<'de> Deserialize<'de> for RealmSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut document = Value::deserialize(deserializer)?;
        let settings = Self::from_json(&document);
        scrub(&mut document);
        settings.map_err(serde::de::Error::custom)
    }
}

/// Zeroize every string value in a JSON document.
pub(crate) fn scrub(value: &mut Value) {
    match value {
        Value::String(s) => s.zeroize(),
        Value::Array(items) => {
            for item in items {
                scrub(item);
            }
        }
        Value::Object(children) => {
            for child in children.values_mut() {
                scrub(child);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

fn flatten(
    key: &str,
    value: &Value,
    builder: RealmSettingsBuilder,
) -> Result<RealmSettingsBuilder, ConfigError> {
    match value {
        Value::Object(children) => {
            let mut builder = builder;
            for (child, child_value) in children {
                builder = flatten(&format!("{key}.{child}"), child_value, builder)?;
            }
            Ok(builder)
        }
        Value::Array(items) => {
            let list = items
                .iter()
                .map(|item| {
                    scalar_text(item).ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_owned(),
                        reason: "list elements must be strings, numbers or booleans".to_owned(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(builder.put_array(key, list))
        }
        other => scalar_text(other)
            .map(|text| builder.put(key, text))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_owned(),
                reason: "null is not a setting value".to_owned(),
            }),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Builder for [`RealmSettings`].
#[derive(Default)]
pub struct RealmSettingsBuilder {
    entries: Vec<(String, SettingValue)>,
}

impl RealmSettingsBuilder {
    #[must_use]
    pub fn put(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key.into(), SettingValue::Single(value.into()))
    }

    #[must_use]
    pub fn put_array<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.insert(key.into(), SettingValue::List(values))
    }

    #[must_use]
    pub fn build(self) -> RealmSettings {
        RealmSettings {
            entries: self.entries,
        }
    }

    // Last definition wins; the replaced value is zeroized when dropped.
    fn insert(mut self, key: String, value: SettingValue) -> Self {
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value));
        self
    }
}

/// Settings a host passes when constructing a realm.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RealmConfig {
    /// Name the realm is registered under.
    pub name: String,

    /// The realm's own settings slice.
    #[serde(default)]
    pub settings: RealmSettings,
}

impl RealmConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, settings: RealmSettings) -> Self {
        Self {
            name: name.into(),
            settings,
        }
    }
}

/// Realm-level options read from the `type`, `order` and `enabled` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealmOptions {
    /// Position in the host's realm chain (lower runs first).
    pub order: i32,

    /// Disabled realms refuse every call.
    pub enabled: bool,
}

impl Default for RealmOptions {
    fn default() -> Self {
        Self {
            order: 0,
            enabled: true,
        }
    }
}

impl RealmOptions {
    /// Read realm-level options, rejecting any key this realm does not know.
    ///
    /// `users.*` keys are left to the credential store.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if `type` is present and is not `custom`
    /// - `InvalidValue` if `order` is not an integer or `enabled` not a boolean
    /// - `UnknownSetting` for any other key outside `users.*`
    pub fn from_settings(settings: &RealmSettings) -> Result<Self, ConfigError> {
        let mut options = Self::default();

        for (key, value) in settings.iter() {
            if key.starts_with(USERS_PREFIX) {
                continue;
            }
            match key {
                TYPE_KEY => {
                    let actual = single(key, value)?;
                    if actual != REALM_TYPE {
                        return Err(ConfigError::TypeMismatch {
                            expected: REALM_TYPE,
                            actual: actual.to_owned(),
                        });
                    }
                }
                ORDER_KEY => {
                    options.order = single(key, value)?.trim().parse().map_err(|_| {
                        ConfigError::InvalidValue {
                            key: key.to_owned(),
                            reason: "expected an integer".to_owned(),
                        }
                    })?;
                }
                ENABLED_KEY => {
                    options.enabled = single(key, value)?.trim().parse().map_err(|_| {
                        ConfigError::InvalidValue {
                            key: key.to_owned(),
                            reason: "expected `true` or `false`".to_owned(),
                        }
                    })?;
                }
                _ => {
                    return Err(ConfigError::UnknownSetting {
                        key: key.to_owned(),
                    });
                }
            }
        }

        Ok(options)
    }
}

pub(crate) fn single<'a>(key: &str, value: &'a SettingValue) -> Result<&'a str, ConfigError> {
    value.as_single().ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_owned(),
        reason: "expected a single value, found a list".to_owned(),
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builder_keeps_last_definition() {
        let settings = RealmSettings::builder()
            .put("users.john.password", "first")
            .put("order", "3")
            .put("users.john.password", "second")
            .build();

        assert_eq!(settings.len(), 2);
        assert_eq!(
            settings.get("users.john.password"),
            Some(&SettingValue::Single("second".to_owned()))
        );
        let keys: Vec<&str> = settings.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["order", "users.john.password"]);
    }

    #[test]
    fn put_array_replaces_single_value() {
        let settings = RealmSettings::builder()
            .put("users.jane.roles", "user")
            .put_array("users.jane.roles", ["user", "admin"])
            .build();

        assert_eq!(
            settings.get("users.jane.roles"),
            Some(&SettingValue::List(vec!["user".to_owned(), "admin".to_owned()]))
        );
    }

    #[test]
    fn from_json_flattens_nested_objects() {
        let document = json!({
            "type": "custom",
            "order": 2,
            "enabled": false,
            "users": {
                "jane": { "password": "test", "roles": ["user", "admin"] }
            }
        });

        let settings = RealmSettings::from_json(&document).unwrap();

        assert_eq!(settings.get("order"), Some(&SettingValue::Single("2".to_owned())));
        assert_eq!(
            settings.get("enabled"),
            Some(&SettingValue::Single("false".to_owned()))
        );
        assert_eq!(
            settings.get("users.jane.password"),
            Some(&SettingValue::Single("test".to_owned()))
        );
        assert_eq!(
            settings.get("users.jane.roles"),
            Some(&SettingValue::List(vec!["user".to_owned(), "admin".to_owned()]))
        );
    }

    #[test]
    fn from_json_rejects_non_object_root() {
        let err = RealmSettings::from_json(&json!(["users"])).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument(_)));
    }

    #[test]
    fn from_json_rejects_null_and_nested_lists() {
        let err = RealmSettings::from_json(&json!({ "users.john.password": null })).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "users.john.password".to_owned(),
                reason: "null is not a setting value".to_owned(),
            }
        );

        let err =
            RealmSettings::from_json(&json!({ "users": { "john": { "roles": [["user"]] } } }))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "users.john.roles"));
    }

    #[test]
    fn debug_redacts_passwords() {
        let settings = RealmSettings::builder()
            .put("users.john.password", "s3cr3t-value")
            .put("users.john.roles", "user")
            .build();

        let debug = format!("{settings:?}");
        assert!(!debug.contains("s3cr3t-value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("user"));
    }

    #[test]
    fn setting_value_debug_hides_contents() {
        let single = SettingValue::Single("s3cr3t-value".to_owned());
        let list = SettingValue::List(vec!["s3cr3t-a".to_owned(), "s3cr3t-b".to_owned()]);

        assert_eq!(format!("{single:?}"), "Single(..)");
        assert_eq!(format!("{list:?}"), "List(<2 values>)");

        let settings = RealmSettings::builder()
            .put("users.john.password", "s3cr3t-value")
            .build();
        let debug = format!("{:?}", settings.get("users.john.password"));
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn scrub_wipes_every_string() {
        let mut document = json!({
            "order": 1,
            "users": { "john": { "password": "doe", "roles": ["user", "admin"] } }
        });

        scrub(&mut document);

        assert_eq!(
            document,
            json!({
                "order": 1,
                "users": { "john": { "password": "", "roles": ["", ""] } }
            })
        );
    }

    #[test]
    fn realm_config_deserializes_from_json() {
        let cfg: RealmConfig = serde_json::from_value(json!({
            "name": "test",
            "settings": { "users.john.password": "doe" }
        }))
        .unwrap();

        assert_eq!(cfg.name, "test");
        assert_eq!(cfg.settings.len(), 1);
    }

    #[test]
    fn options_default_when_absent() {
        let options = RealmOptions::from_settings(&RealmSettings::default()).unwrap();
        assert_eq!(options, RealmOptions::default());
        assert!(options.enabled);
        assert_eq!(options.order, 0);
    }

    #[test]
    fn options_parse_order_and_enabled() {
        let settings = RealmSettings::builder()
            .put("type", "custom")
            .put("order", "-5")
            .put("enabled", "false")
            .put("users.john.password", "doe")
            .build();

        let options = RealmOptions::from_settings(&settings).unwrap();
        assert_eq!(options.order, -5);
        assert!(!options.enabled);
    }

    #[test]
    fn options_reject_foreign_realm_type() {
        let settings = RealmSettings::builder().put("type", "ldap").build();

        let err = RealmOptions::from_settings(&settings).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TypeMismatch {
                expected: REALM_TYPE,
                actual: "ldap".to_owned(),
            }
        );
    }

    #[test]
    fn options_reject_bad_values_and_unknown_keys() {
        let settings = RealmSettings::builder().put("order", "first").build();
        assert!(matches!(
            RealmOptions::from_settings(&settings),
            Err(ConfigError::InvalidValue { key, .. }) if key == "order"
        ));

        let settings = RealmSettings::builder().put("enabled", "yes").build();
        assert!(matches!(
            RealmOptions::from_settings(&settings),
            Err(ConfigError::InvalidValue { key, .. }) if key == "enabled"
        ));

        let settings = RealmSettings::builder().put("user.john.password", "doe").build();
        assert_eq!(
            RealmOptions::from_settings(&settings),
            Err(ConfigError::UnknownSetting {
                key: "user.john.password".to_owned()
            })
        );
    }
}
