//! Config overlay and value expansion.
//!
//! A [`Config`] is a named, ordered key/value mapping; a [`ConfigSet`] is
//! an ordered collection of configs reachable by name. On top of the set
//! sits the expansion engine, which resolves `${key}` and `${section|key}`
//! placeholders inside values, optionally writing the resolved text back.
//!
//! The config tree and the [`IniDocument`] model are independently owned;
//! [`ConfigSet::from_document`] and [`ConfigSet::apply_to_document`] are
//! the explicit, one-directional reconciliation steps between them.
//!
//! ## Examples
//!
//! ```rust
//! use initext::ConfigSet;
//!
//! let mut set = ConfigSet::new();
//! let paths = set.add("paths");
//! paths.set("root", "/srv/app");
//! paths.set("logs", "${root}/logs");
//!
//! assert_eq!(set.get_expanded("paths", "logs").unwrap(), "/srv/app/logs");
//! // The stored value is untouched until an in-place expand:
//! assert_eq!(set.get("paths").unwrap().get("logs"), Some("${root}/logs"));
//! ```

use crate::{Error, IniDocument, IniItem, IniSection, Result};
use indexmap::IndexMap;

/// A re-scan ceiling so runaway transitive reference cycles terminate
/// with an error instead of hanging.
const MAX_EXPANSION_PASSES: usize = 100;

/// A change record produced by [`Config`] mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigEvent {
    /// A key was set (added or overwritten) to `value`.
    KeySet { key: String, value: String },
    /// A key was removed; `value` is what it held.
    KeyRemoved { key: String, value: String },
}

/// A named mapping from key to string value, in insertion order.
///
/// Mutations through [`set`](Config::set) and [`remove`](Config::remove)
/// enqueue [`ConfigEvent`] records; callers interested in change
/// notification drain them with [`drain_events`](Config::drain_events).
#[derive(Clone, Debug, Default)]
pub struct Config {
    name: String,
    keys: IndexMap<String, String>,
    events: Vec<ConfigEvent>,
}

impl Config {
    /// Creates an empty config.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Config {
            name: name.into(),
            keys: IndexMap::new(),
            events: Vec::new(),
        }
    }

    /// The config name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    /// Returns true if `key` exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    /// Key names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Inserts `key` without recording a change event. Used when a config
    /// is populated from a document rather than mutated by a caller.
    pub fn add(&mut self, key: &str, value: &str) {
        self.keys.insert(key.to_string(), value.to_string());
    }

    /// Sets `key` to `value` and records a [`ConfigEvent::KeySet`].
    pub fn set(&mut self, key: &str, value: &str) {
        self.keys.insert(key.to_string(), value.to_string());
        self.events.push(ConfigEvent::KeySet {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// Removes `key` if present, recording a [`ConfigEvent::KeyRemoved`].
    pub fn remove(&mut self, key: &str) {
        // shift_remove keeps the remaining keys in order
        if let Some(value) = self.keys.shift_remove(key) {
            self.events.push(ConfigEvent::KeyRemoved {
                key: key.to_string(),
                value,
            });
        }
    }

    /// Takes the queued change events, leaving the queue empty.
    pub fn drain_events(&mut self) -> Vec<ConfigEvent> {
        std::mem::take(&mut self.events)
    }

    /// The value of `key` parsed as an integer.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if absent, [`Error::InvalidValue`] if the
    /// value does not parse.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.require(key)?;
        value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                expected: "integer",
            })
    }

    /// Like [`get_int`](Config::get_int), but falls back to `default` when
    /// the key is absent. An unparseable value is still an error.
    pub fn get_int_or(&self, key: &str, default: i64) -> Result<i64> {
        if self.contains(key) {
            self.get_int(key)
        } else {
            Ok(default)
        }
    }

    /// The value of `key` parsed as a float.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if absent, [`Error::InvalidValue`] if the
    /// value does not parse.
    pub fn get_float(&self, key: &str) -> Result<f64> {
        let value = self.require(key)?;
        value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                expected: "float",
            })
    }

    /// Like [`get_float`](Config::get_float), but falls back to `default`
    /// when the key is absent.
    pub fn get_float_or(&self, key: &str, default: f64) -> Result<f64> {
        if self.contains(key) {
            self.get_float(key)
        } else {
            Ok(default)
        }
    }

    /// The value of `key` parsed as a boolean (`true`/`false`, any case).
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if absent, [`Error::InvalidValue`] if the
    /// value does not parse.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.require(key)?;
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(Error::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                expected: "boolean",
            })
        }
    }

    /// Like [`get_bool`](Config::get_bool), but falls back to `default`
    /// when the key is absent.
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            Ok(default)
        }
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::key_not_found(key))
    }
}

/// An ordered collection of named [`Config`]s with the `${...}` expansion
/// engine.
#[derive(Clone, Debug, Default)]
pub struct ConfigSet {
    configs: Vec<Config>,
}

impl ConfigSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        ConfigSet {
            configs: Vec::new(),
        }
    }

    /// Builds a set from a document: one config per section, key items
    /// only (blank and comment lines do not carry values).
    #[must_use]
    pub fn from_document(doc: &IniDocument) -> Self {
        let mut set = ConfigSet::new();
        for section in doc.sections() {
            let config = set.add(section.name());
            for item in section.items() {
                if let IniItem::Key { name, value, .. } = item {
                    config.add(name, value);
                }
            }
        }
        set
    }

    /// Applies this set's state onto a document: sections with no matching
    /// config are dropped, sections are created for new configs, keys the
    /// config no longer holds are removed, and every config key is set.
    /// Section comments, key comments, and blank/comment items of
    /// surviving sections are left in place.
    pub fn apply_to_document(&self, doc: &mut IniDocument) {
        let stale: Vec<String> = doc
            .sections()
            .iter()
            .filter(|s| self.get(s.name()).is_none())
            .map(|s| s.name().to_string())
            .collect();
        for name in stale {
            doc.remove_section(&name);
        }

        for config in &self.configs {
            if doc.section(config.name()).is_none() {
                doc.add_section(IniSection::new(config.name()));
            }
            if let Some(section) = doc.section_mut(config.name()) {
                let removed: Vec<String> = section
                    .keys()
                    .into_iter()
                    .filter(|&key| !config.contains(key))
                    .map(str::to_string)
                    .collect();
                for key in removed {
                    section.remove(&key);
                }
                for (key, value) in config.iter() {
                    section.set_value(key, value);
                }
            }
        }
    }

    /// Returns the config named `name`, creating it if absent.
    pub fn add(&mut self, name: &str) -> &mut Config {
        let pos = match self.configs.iter().position(|c| c.name() == name) {
            Some(pos) => pos,
            None => {
                self.configs.push(Config::new(name));
                self.configs.len() - 1
            }
        };
        &mut self.configs[pos]
    }

    /// Looks up a config by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Config> {
        self.configs.iter().find(|c| c.name() == name)
    }

    /// Looks up a config by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Config> {
        self.configs.iter_mut().find(|c| c.name() == name)
    }

    /// Removes a config by name. Returns true if one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.configs.len();
        self.configs.retain(|c| c.name() != name);
        self.configs.len() != before
    }

    /// All configs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Config> {
        self.configs.iter()
    }

    /// The number of configs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Resolves `${...}` placeholders in the value of `key` within the
    /// config named `config`, without mutating anything.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] / [`Error::KeyNotFound`] for unresolvable
    /// references, [`Error::SelfReferenceCycle`] when the key references
    /// itself (or a transitive cycle exhausts the re-scan bound).
    pub fn get_expanded(&self, config: &str, key: &str) -> Result<String> {
        self.expand_value(config, key)
    }

    /// Resolves `${...}` placeholders and writes the result back.
    ///
    /// On failure nothing is written: the stored value is never left
    /// partially substituted.
    ///
    /// # Errors
    ///
    /// Same as [`get_expanded`](ConfigSet::get_expanded).
    pub fn expand(&mut self, config: &str, key: &str) -> Result<String> {
        let resolved = self.expand_value(config, key)?;
        if let Some(cfg) = self.get_mut(config) {
            cfg.set(key, &resolved);
        }
        Ok(resolved)
    }

    /// Expands every key of every config, writing each result back.
    ///
    /// # Errors
    ///
    /// Stops at the first unresolvable key; keys expanded before the
    /// failure keep their resolved values.
    pub fn expand_all(&mut self) -> Result<()> {
        let names: Vec<String> = self.configs.iter().map(|c| c.name().to_string()).collect();
        for name in names {
            let keys: Vec<String> = match self.get(&name) {
                Some(config) => config.keys().map(str::to_string).collect(),
                None => continue,
            };
            for key in keys {
                self.expand(&name, &key)?;
            }
        }
        Ok(())
    }

    fn expand_value(&self, config_name: &str, key: &str) -> Result<String> {
        let config = self
            .get(config_name)
            .ok_or_else(|| Error::config_not_found(config_name))?;
        let mut result = config
            .get(key)
            .ok_or_else(|| Error::key_not_found(key))?
            .to_string();

        let mut passes = 0;
        while let Some(start) = result.find("${") {
            let Some(end) = result[start + 2..].find('}') else {
                // A dangling "${" without "}" is literal text.
                break;
            };
            let reference = result[start + 2..start + 2 + end].to_string();

            if reference == key {
                return Err(Error::SelfReferenceCycle {
                    key: key.to_string(),
                });
            }
            passes += 1;
            if passes > MAX_EXPANSION_PASSES {
                return Err(Error::SelfReferenceCycle {
                    key: key.to_string(),
                });
            }

            let replacement = self.resolve_reference(config, &reference)?;
            let placeholder = format!("${{{reference}}}");
            result = result.replace(&placeholder, &replacement);
        }

        Ok(result)
    }

    fn resolve_reference(&self, config: &Config, reference: &str) -> Result<String> {
        let parts: Vec<&str> = reference.split('|').collect();

        if parts.len() > 1 {
            let other = self
                .get(parts[0])
                .ok_or_else(|| Error::config_not_found(parts[0]))?;
            other
                .get(parts[1])
                .map(str::to_string)
                .ok_or_else(|| Error::key_not_found(parts[1]))
        } else {
            config
                .get(reference)
                .map(str::to_string)
                .ok_or_else(|| Error::key_not_found(reference))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ConfigSet {
        let mut set = ConfigSet::new();
        let web = set.add("web");
        web.set("host", "localhost");
        web.set("port", "8080");
        web.set("url", "http://${host}:${port}/");
        let app = set.add("app");
        app.set("endpoint", "${web|url}api");
        set
    }

    #[test]
    fn test_same_config_expansion() {
        let set = sample_set();
        assert_eq!(
            set.get_expanded("web", "url").unwrap(),
            "http://localhost:8080/"
        );
    }

    #[test]
    fn test_cross_config_expansion() {
        let set = sample_set();
        assert_eq!(
            set.get_expanded("app", "endpoint").unwrap(),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_no_placeholder_is_a_no_op() {
        let set = sample_set();
        assert_eq!(set.get_expanded("web", "host").unwrap(), "localhost");
    }

    #[test]
    fn test_expand_writes_back() {
        let mut set = sample_set();
        set.expand("web", "url").unwrap();
        assert_eq!(
            set.get("web").unwrap().get("url"),
            Some("http://localhost:8080/")
        );
    }

    #[test]
    fn test_failed_expand_leaves_value_untouched() {
        let mut set = ConfigSet::new();
        set.add("c").set("broken", "${missing}");
        assert!(set.expand("c", "broken").is_err());
        assert_eq!(set.get("c").unwrap().get("broken"), Some("${missing}"));
    }

    #[test]
    fn test_direct_self_reference() {
        let mut set = ConfigSet::new();
        set.add("c").set("itself", "${itself}");
        assert!(matches!(
            set.get_expanded("c", "itself"),
            Err(Error::SelfReferenceCycle { .. })
        ));
    }

    #[test]
    fn test_transitive_cycle_terminates() {
        let mut set = ConfigSet::new();
        let c = set.add("c");
        c.set("a", "${b}");
        c.set("b", "x${b}x");
        assert!(matches!(
            set.get_expanded("c", "a"),
            Err(Error::SelfReferenceCycle { .. })
        ));
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        let mut set = ConfigSet::new();
        set.add("c").set("k", "before ${dangling");
        assert_eq!(set.get_expanded("c", "k").unwrap(), "before ${dangling");
    }

    #[test]
    fn test_missing_config_and_key() {
        let mut other = ConfigSet::new();
        other.add("c").set("k", "${ghost|key}");
        assert!(matches!(
            other.get_expanded("c", "k"),
            Err(Error::ConfigNotFound { .. })
        ));

        let mut missing_key = ConfigSet::new();
        missing_key.add("foo").set("present", "1");
        missing_key.add("c").set("k", "${foo|absent}");
        assert!(matches!(
            missing_key.get_expanded("c", "k"),
            Err(Error::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_expand_all() {
        let mut set = sample_set();
        set.expand_all().unwrap();
        assert_eq!(
            set.get("app").unwrap().get("endpoint"),
            Some("http://localhost:8080/api")
        );
    }

    #[test]
    fn test_typed_accessors() {
        let mut set = ConfigSet::new();
        let c = set.add("c");
        c.set("port", "8080");
        c.set("ratio", "0.5");
        c.set("debug", "True");
        c.set("junk", "not a number");

        assert_eq!(c.get_int("port").unwrap(), 8080);
        assert_eq!(c.get_float("ratio").unwrap(), 0.5);
        assert!(c.get_bool("debug").unwrap());
        assert_eq!(c.get_int_or("missing", 7).unwrap(), 7);
        assert!(matches!(
            c.get_int("junk"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            c.get_int("missing"),
            Err(Error::KeyNotFound { .. })
        ));
    }

    #[test]
    fn test_change_events() {
        let mut config = Config::new("c");
        config.set("a", "1");
        config.remove("a");
        config.remove("a"); // absent, no event

        let events = config.drain_events();
        assert_eq!(
            events,
            vec![
                ConfigEvent::KeySet {
                    key: "a".to_string(),
                    value: "1".to_string()
                },
                ConfigEvent::KeyRemoved {
                    key: "a".to_string(),
                    value: "1".to_string()
                },
            ]
        );
        assert!(config.drain_events().is_empty());
    }

    #[test]
    fn test_document_reconciliation() {
        let doc = IniDocument::from_str(
            "[keep]\na = 1 ; note\nb = 2\n[drop]\nx = 9\n",
        )
        .unwrap();

        let mut set = ConfigSet::from_document(&doc);
        assert_eq!(set.get("keep").unwrap().get("a"), Some("1"));

        set.remove("drop");
        let keep = set.add("keep");
        keep.remove("b");
        keep.set("a", "10");
        set.add("fresh").set("y", "3");

        let mut doc = doc;
        set.apply_to_document(&mut doc);

        assert!(doc.section("drop").is_none());
        let keep = doc.section("keep").unwrap();
        assert_eq!(keep.get("a"), Some("10"));
        assert!(!keep.contains("b"));
        // the comment on `a` survives the merge
        assert_eq!(keep.item(0).unwrap().comment(), Some("note"));
        assert_eq!(doc.section("fresh").unwrap().get("y"), Some("3"));
    }
}
