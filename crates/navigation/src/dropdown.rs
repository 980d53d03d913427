//! Dropdown panels built from other registered menus.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeKind, Attributes};
use crate::item::Item;

/// Class names and tags used when an item renders as a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    /// Class added to the item itself.
    pub item_class: String,
    /// Class added to the item's link.
    pub toggle_class: String,
    /// Class of the panel wrapping the entries.
    pub menu_class: String,
    /// Class added to each entry's link.
    pub entry_class: String,
    /// Outer tag of each entry.
    pub entry_tag: String,
    /// Align the panel to the right edge of the toggle.
    pub align_right: bool,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            item_class: "dropdown".to_string(),
            toggle_class: "dropdown-toggle".to_string(),
            menu_class: "dropdown-menu".to_string(),
            entry_class: "dropdown-item".to_string(),
            entry_tag: "div".to_string(),
            align_right: false,
        }
    }
}

/// The menus a dropdown item expands into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dropdown {
    pub menus: Vec<String>,
    #[serde(default)]
    pub config: DropdownConfig,
}

impl Dropdown {
    pub fn new<I, S>(menus: I, config: DropdownConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            menus: menus.into_iter().map(Into::into).collect(),
            config,
        }
    }

    /// Attributes of the panel `div`.
    pub(crate) fn panel_attributes(&self, toggle_id: &str) -> Attributes {
        let mut attrs = Attributes::sorted();
        attrs.add("class", &self.config.menu_class);
        if self.config.align_right {
            attrs.add("class", &format!("{}-right", self.config.menu_class));
        }
        attrs.set("aria-labelledby", toggle_id);
        attrs
    }
}

/// Turn `item` into a toggle for its dropdown panel.
pub(crate) fn apply_toggle(item: &mut Item, config: &DropdownConfig) {
    let toggle_id = toggle_id(item);
    item.add_attribute(AttributeKind::Item, "class", &config.item_class)
        .add_attribute(AttributeKind::Link, "class", &config.toggle_class)
        .set_attribute(AttributeKind::Link, "id", &toggle_id)
        .set_attribute(AttributeKind::Link, "role", "button")
        .set_attribute(AttributeKind::Link, "data-toggle", "dropdown")
        .set_attribute(AttributeKind::Link, "aria-haspopup", "true")
        .set_attribute(AttributeKind::Link, "aria-expanded", "false");
}

pub(crate) fn toggle_id(item: &Item) -> String {
    format!("dropdown-{}", item.id())
}
