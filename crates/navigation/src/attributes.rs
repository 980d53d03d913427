//! Attribute bags rendered as HTML tag attributes.
//!
//! Token attributes (`class`, and `style` on menus) are kept as
//! deduplicated token lists; every other attribute is a plain string that
//! is concatenated, prepended or cut. A value that becomes empty removes
//! the attribute.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Which of an item's attribute bags an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// The outer item tag (`li`).
    Item,
    /// The anchor or span wrapping the title.
    Link,
    /// The tag wrapping the item's children (`ul`).
    Container,
}

/// How token attributes are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// `class` tokens are deduplicated and sorted ascending (items).
    #[default]
    Sorted,
    /// `class` and `style` tokens keep insertion order (menus).
    Ordered,
}

/// A name → value attribute mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, String>,
    policy: TokenPolicy,
}

impl Attributes {
    /// Bag with sorted `class` tokens, as used on items.
    pub fn sorted() -> Self {
        Self::default()
    }

    /// Bag with insertion-ordered `class`/`style` tokens, as used on menus.
    pub fn ordered() -> Self {
        Self {
            values: BTreeMap::new(),
            policy: TokenPolicy::Ordered,
        }
    }

    /// How values of this set are tokenized.
    pub fn policy(&self) -> TokenPolicy {
        self.policy
    }

    /// Stored value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Stored value of an attribute, or `default` when absent.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether a token attribute currently holds `token`.
    pub fn has_token(&self, name: &str, token: &str) -> bool {
        let Some(current) = self.get(name) else {
            return false;
        };
        match self.separator(name) {
            Some(sep) => split_tokens(current, sep).contains(&token),
            None => current == token,
        }
    }

    /// Overwrite an attribute.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Add to an attribute; same as [`Attributes::append`].
    pub fn add(&mut self, name: &str, value: &str) -> &mut Self {
        self.append(name, value)
    }

    /// Append tokens, or concatenate for plain attributes.
    pub fn append(&mut self, name: &str, value: &str) -> &mut Self {
        let current = self.get_or(name, "").to_string();
        let updated = match self.separator(name) {
            Some(sep) => self.merge_tokens(&current, value, sep, Placement::End),
            None => format!("{current}{value}").trim().to_string(),
        };
        self.store(name, updated)
    }

    /// Prepend tokens, or prefix plain attributes.
    pub fn prepend(&mut self, name: &str, value: &str) -> &mut Self {
        let current = self.get_or(name, "").to_string();
        let updated = match self.separator(name) {
            Some(sep) => self.merge_tokens(&current, value, sep, Placement::Start),
            None => format!("{value}{current}").trim().to_string(),
        };
        self.store(name, updated)
    }

    /// Remove tokens, or the first occurrence of `value` for plain attributes.
    pub fn remove(&mut self, name: &str, value: &str) -> &mut Self {
        let Some(current) = self.get(name).map(str::to_string) else {
            return self;
        };
        let updated = match self.separator(name) {
            Some(sep) => {
                let drop = split_tokens(value, sep);
                split_tokens(&current, sep)
                    .into_iter()
                    .filter(|t| !drop.contains(t))
                    .collect::<Vec<_>>()
                    .join(sep.joiner())
            }
            None => current.replacen(value, "", 1).trim().to_string(),
        };
        self.store(name, updated)
    }

    /// Drop an attribute entirely.
    pub fn clear(&mut self, name: &str) -> &mut Self {
        self.values.remove(name);
        self
    }

    /// Attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attributes keyed by name.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    fn store(&mut self, name: &str, value: String) -> &mut Self {
        if value.is_empty() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
        self
    }

    fn separator(&self, name: &str) -> Option<Separator> {
        match (name, self.policy) {
            ("class", _) => Some(Separator::Space),
            ("style", TokenPolicy::Ordered) => Some(Separator::Semicolon),
            _ => None,
        }
    }

    fn merge_tokens(&self, current: &str, value: &str, sep: Separator, at: Placement) -> String {
        let incoming = split_tokens(value, sep);

        if self.policy == TokenPolicy::Sorted {
            let merged: BTreeSet<&str> = split_tokens(current, sep)
                .into_iter()
                .chain(incoming)
                .collect();
            return merged.into_iter().collect::<Vec<_>>().join(sep.joiner());
        }

        let mut kept: Vec<&str> = Vec::new();
        for token in split_tokens(current, sep) {
            if !incoming.contains(&token) && !kept.contains(&token) {
                kept.push(token);
            }
        }
        let mut fresh: Vec<&str> = Vec::new();
        for token in incoming {
            if !fresh.contains(&token) {
                fresh.push(token);
            }
        }

        let tokens = match at {
            Placement::End => [kept, fresh].concat(),
            Placement::Start => [fresh, kept].concat(),
        };
        tokens.join(sep.joiner())
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[derive(Debug, Clone, Copy)]
enum Separator {
    Space,
    Semicolon,
}

impl Separator {
    fn joiner(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Semicolon => ";",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Start,
    End,
}

fn split_tokens(value: &str, sep: Separator) -> Vec<&str> {
    match sep {
        Separator::Space => value.split_whitespace().collect(),
        Separator::Semicolon => value
            .split(';')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_tokens_are_sorted_and_deduplicated() {
        let mut attrs = Attributes::sorted();
        attrs.add("class", "nav").add("class", "foo").add("class", "foo");
        assert_eq!(attrs.get("class"), Some("foo nav"));
    }

    #[test]
    fn class_add_is_idempotent() {
        let mut once = Attributes::sorted();
        once.add("class", "foo");
        let mut twice = once.clone();
        twice.add("class", "foo");
        assert_eq!(once, twice);
    }

    #[test]
    fn class_add_tokenizes_whitespace() {
        let mut attrs = Attributes::sorted();
        attrs.add("class", "  zeta   alpha ");
        assert_eq!(attrs.get("class"), Some("alpha zeta"));
    }

    #[test]
    fn class_add_then_remove_restores_value() {
        let mut attrs = Attributes::sorted();
        attrs.add("class", "btn primary");
        let before = attrs.clone();
        attrs.add("class", "foo").remove("class", "foo");
        assert_eq!(attrs, before);
    }

    #[test]
    fn removing_last_token_drops_attribute() {
        let mut attrs = Attributes::sorted();
        attrs.add("class", "active").remove("class", "active");
        assert!(!attrs.contains("class"));
        assert!(attrs.is_empty());
    }

    #[test]
    fn plain_attribute_append_prepend_remove() {
        let mut attrs = Attributes::sorted();
        attrs.add("data-x", "middle");
        attrs.append("data-x", "-end ");
        attrs.prepend("data-x", " start-");
        assert_eq!(attrs.get("data-x"), Some("start-middle-end"));

        attrs.remove("data-x", "-");
        assert_eq!(attrs.get("data-x"), Some("startmiddle-end"));
    }

    #[test]
    fn plain_attribute_emptied_is_removed() {
        let mut attrs = Attributes::sorted();
        attrs.add("title", "hello").remove("title", "hello");
        assert_eq!(attrs.get("title"), None);
    }

    #[test]
    fn whitespace_only_value_is_not_stored() {
        let mut attrs = Attributes::sorted();
        attrs.add("title", "   ");
        assert!(attrs.is_empty());
    }

    #[test]
    fn item_style_is_plain_text() {
        let mut attrs = Attributes::sorted();
        attrs.add("style", "color: red;").add("style", "color: red;");
        assert_eq!(attrs.get("style"), Some("color: red;color: red;"));
    }

    #[test]
    fn ordered_class_keeps_insertion_order() {
        let mut attrs = Attributes::ordered();
        attrs.add("class", "nav").add("class", "foo");
        assert_eq!(attrs.get("class"), Some("nav foo"));

        attrs.remove("class", "foo");
        assert_eq!(attrs.get("class"), Some("nav"));

        attrs.append("class", "foo");
        assert_eq!(attrs.get("class"), Some("nav foo"));

        attrs.prepend("class", "foo");
        assert_eq!(attrs.get("class"), Some("foo nav"));
    }

    #[test]
    fn ordered_style_uses_semicolons() {
        let mut attrs = Attributes::ordered();
        attrs.add("style", "color: red").add("style", "margin: 0");
        assert_eq!(attrs.get("style"), Some("color: red;margin: 0"));

        attrs.add("style", "color: red");
        assert_eq!(attrs.get("style"), Some("margin: 0;color: red"));

        attrs.remove("style", "margin: 0");
        assert_eq!(attrs.get("style"), Some("color: red"));
    }

    #[test]
    fn has_token_checks_class_membership() {
        let mut attrs = Attributes::sorted();
        attrs.add("class", "active nav");
        assert!(attrs.has_token("class", "active"));
        assert!(!attrs.has_token("class", "act"));
        assert!(!attrs.has_token("id", "active"));
    }

    #[test]
    fn get_or_falls_back() {
        let attrs = Attributes::sorted();
        assert_eq!(attrs.get_or("id", "fallback"), "fallback");
    }
}
