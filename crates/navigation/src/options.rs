//! Rendering and behaviour options for items and menus.
//!
//! Options are distinct from attributes: they steer how an item renders
//! (which tags, which visibility rules) and never appear in the markup.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::item::Item;

/// Outer tag of an item (default `li`).
pub const TAG: &str = "tag";
/// Item tag a menu hands down to its top-level items.
pub const ITEM_TAG: &str = "item_tag";
/// Tag wrapping an item's children (default `ul`).
pub const CONTAINER_TAG: &str = "container_tag";
/// Base class of the children container (default `nav`).
pub const CONTAINER_CLASS: &str = "container_class";
/// Render the plain title and ignore html overrides and link attributes.
pub const TEXT_ONLY: &str = "text_only";
/// Skip rendering the item's children.
pub const HIDE_CHILDREN: &str = "hide_children";
/// Render the item as inactive regardless of its state.
pub const FORCE_INACTIVE: &str = "force_inactive";
/// Hide the item unless it is active.
pub const HIDE_IF_NOT_ACTIVE: &str = "hide_if_not_active";
/// Hide the item while it is active.
pub const HIDE_IF_ACTIVE: &str = "hide_if_active";
/// Open the link in a new window (`target="_blank"`).
pub const OPEN_NEW_WINDOW: &str = "open_new_window";
/// Put the `active` class on the link instead of the item.
pub const ACTIVE_ON_LINK: &str = "active_on_link";
/// Nicknames (or `menu.nickname` paths) that activate this item.
pub const ACTIVE_IF_ITEM_IS_ACTIVE: &str = "active_if_item_is_active";
/// Nicknames (or `menu.nickname` paths) one of which must be active to show this item.
pub const HIDE_IF_ITEM_NOT_ACTIVE: &str = "hide_if_item_not_active";
/// Callback applied to each child before it renders.
pub const ITEM_CALLBACK: &str = "item_callback";
/// Omit the `title` attribute on the link.
pub const NO_TITLE: &str = "no_title";
/// Wrap unlinked titles in a `span`.
pub const SPAN_TEXT: &str = "span_text";
/// Ability the authorizer must grant for the item to render.
pub const PERMISSION: &str = "permission";
/// Subject passed to the authorizer along with the ability.
pub const PERMISSION_SUBJECT: &str = "permission_subject";

/// Callback run against an item in the render copy before it renders.
pub type ItemCallback = Arc<dyn Fn(&mut Item) + Send + Sync>;

/// A single option value.
#[derive(Clone)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Callback(ItemCallback),
}

impl OptionValue {
    /// Wrap a closure as a callback option.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&mut Item) + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(f))
    }

    /// Truthiness used by boolean option getters.
    pub fn is_enabled(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Text(s) => !s.is_empty(),
            OptionValue::List(list) => !list.is_empty(),
            OptionValue::Callback(_) => true,
        }
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            OptionValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            OptionValue::List(l) => f.debug_tuple("List").field(l).finish(),
            OptionValue::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

impl PartialEq for OptionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptionValue::Bool(a), OptionValue::Bool(b)) => a == b,
            (OptionValue::Text(a), OptionValue::Text(b)) => a == b,
            (OptionValue::List(a), OptionValue::List(b)) => a == b,
            (OptionValue::Callback(a), OptionValue::Callback(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OptionValue {
    fn from(value: [&str; N]) -> Self {
        OptionValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<ItemCallback> for OptionValue {
    fn from(value: ItemCallback) -> Self {
        OptionValue::Callback(value)
    }
}

/// An option bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Set a boolean option to `true`.
    pub fn enable(&mut self, name: &str) -> &mut Self {
        self.set(name, true)
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.values.remove(name)
    }

    /// Boolean read; missing options are `false`.
    pub fn enabled(&self, name: &str) -> bool {
        self.get(name).is_some_and(OptionValue::is_enabled)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(OptionValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text read with a default for missing or non-text values.
    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.text(name).unwrap_or(default)
    }

    /// List read; a single text value counts as a one-element list.
    pub fn list(&self, name: &str) -> Vec<&str> {
        match self.get(name) {
            Some(OptionValue::List(list)) => list.iter().map(String::as_str).collect(),
            Some(OptionValue::Text(s)) if !s.is_empty() => vec![s.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn callback(&self, name: &str) -> Option<ItemCallback> {
        match self.get(name) {
            Some(OptionValue::Callback(cb)) => Some(Arc::clone(cb)),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
