//! Declarative menu definitions.
//!
//! Menus can be described in JSON or TOML and loaded into a
//! [`Navigation`]. A definition also carries the base URL and named route
//! patterns needed to build a [`RouteTable`] for rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::attributes::AttributeKind;
use crate::dropdown::Dropdown;
use crate::error::Result;
use crate::link::Link;
use crate::menu::{ItemMut, Menu};
use crate::navigation::Navigation;
use crate::options::{self, OptionValue};
use crate::resolver::RouteTable;

/// A whole navigation: routes plus menus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationDefinition {
    /// Base URL every generated link is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Generate plain URL links without forcing https.
    #[serde(default = "default_true")]
    pub no_ssl: bool,
    /// Route name → path pattern (e.g. "/blog/:slug").
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
    /// Action name → path pattern.
    #[serde(default)]
    pub actions: BTreeMap<String, String>,
    /// Menus in registration order.
    #[serde(default)]
    pub menus: Vec<MenuDefinition>,
}

fn default_base_url() -> String {
    "http://localhost".to_string()
}
fn default_true() -> bool {
    true
}

/// One menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDefinition {
    pub name: String,
    /// Attributes of the menu tag (`class`, `style`, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Menu options (`tag`, `item_tag`, `text_only`, ...).
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
}

/// One item and its children.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub title: String,
    /// Overrides the nickname derived from the title.
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub link: Link,
    /// Rendered-html override of the title.
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub active: bool,
    /// Ability required to see the item (empty = public).
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub item_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub link_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub container_attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub dropdown: Option<Dropdown>,
    #[serde(default)]
    pub children: Vec<ItemDefinition>,
}

impl NavigationDefinition {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Resolver over this definition's base URL, routes and actions.
    pub fn route_table(&self) -> Result<RouteTable> {
        let mut table = RouteTable::new(&self.base_url)?.with_no_ssl(self.no_ssl);
        for (name, pattern) in &self.routes {
            table.add_route(name, pattern);
        }
        for (name, pattern) in &self.actions {
            table.add_action(name, pattern);
        }
        debug!(
            base_url = %self.base_url,
            routes = self.routes.len(),
            actions = self.actions.len(),
            "built route table"
        );
        Ok(table)
    }
}

impl MenuDefinition {
    fn apply(&self, menu: &mut Menu) {
        for (name, value) in &self.attributes {
            menu.add_attribute(name, value);
        }
        for (name, value) in &self.options {
            if let Some(value) = option_value(name, value) {
                menu.set_option(name, value);
            }
        }
        for item in &self.items {
            let mut handle = menu.add(&item.title);
            item.apply(&mut handle);
        }
    }
}

impl ItemDefinition {
    fn apply(&self, handle: &mut ItemMut<'_>) {
        if let Some(nickname) = &self.nickname {
            handle.set_nickname(nickname);
        }
        handle.set_link(self.link.clone());
        if let Some(html) = &self.html {
            handle.set_html(html, &[]);
        }

        let bags = [
            (AttributeKind::Item, &self.item_attributes),
            (AttributeKind::Link, &self.link_attributes),
            (AttributeKind::Container, &self.container_attributes),
        ];
        for (kind, attributes) in bags {
            for (name, value) in attributes {
                handle.add_attribute(kind, name, value);
            }
        }

        for (name, value) in &self.options {
            if let Some(value) = option_value(name, value) {
                handle.set_option(name, value);
            }
        }
        if let Some(permission) = &self.permission {
            handle.set_option(options::PERMISSION, permission.as_str());
        }
        for (name, value) in &self.data {
            handle.set_data(name, value);
        }
        if matches!(self.link, Link::ExternalUrl { .. }) {
            handle.enable_option(options::OPEN_NEW_WINDOW);
        }
        handle.set_dropdown(self.dropdown.clone());

        for child in &self.children {
            let mut child_handle = handle.add(&child.title);
            child.apply(&mut child_handle);
        }

        if self.active {
            handle.set_active(true);
        }
    }
}

/// Map a JSON/TOML value onto an option value.
///
/// Booleans, strings, numbers and string arrays are supported; anything
/// else is skipped with a warning.
fn option_value(name: &str, value: &Value) -> Option<OptionValue> {
    let mapped = match value {
        Value::Bool(b) => Some(OptionValue::Bool(*b)),
        Value::String(s) => Some(OptionValue::Text(s.clone())),
        Value::Number(n) => Some(OptionValue::Text(n.to_string())),
        Value::Array(values) => values
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(OptionValue::List),
        Value::Null | Value::Object(_) => None,
    };
    if mapped.is_none() {
        warn!(option = %name, value = %value, "unsupported option value, skipped");
    }
    mapped
}

impl Navigation {
    /// Build and register every menu of `definition`.
    ///
    /// Menus already registered under the same names are replaced.
    pub fn load(&mut self, definition: &NavigationDefinition) {
        for menu in &definition.menus {
            self.create_menu_with(&menu.name, |target| menu.apply(target));
        }
        debug!(menus = definition.menus.len(), "loaded navigation definition");
    }

    pub fn from_definition(definition: &NavigationDefinition) -> Self {
        let mut navigation = Navigation::new();
        navigation.load(definition);
        navigation
    }
}
