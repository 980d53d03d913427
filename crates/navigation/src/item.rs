//! Menu items.
//!
//! An [`Item`] is a node of a menu tree. The owning [`Menu`](crate::Menu)
//! holds every item in one ordered arena; items refer to their parent by
//! [`ItemId`] only.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::attributes::{AttributeKind, Attributes};
use crate::dropdown::{Dropdown, DropdownConfig};
use crate::error::Result;
use crate::link::Link;
use crate::options::{self, OptionValue, Options};
use crate::resolver::UrlResolver;

/// Class token marking active items.
pub const ACTIVE_CLASS: &str = "active";

/// Process-unique item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A node in a menu tree.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    parent_id: Option<ItemId>,
    link: Link,
    title: String,
    nickname: String,
    /// The nickname was set explicitly and no longer follows the title.
    nickname_pinned: bool,
    active: bool,
    html: Option<String>,
    before: String,
    after: String,
    data: BTreeMap<String, String>,
    options: Options,
    item_attributes: Attributes,
    link_attributes: Attributes,
    container_attributes: Attributes,
    dropdown: Option<Dropdown>,
}

impl Item {
    /// Create a detached item; [`Menu::add_item`](crate::Menu::add_item)
    /// places it in a menu.
    pub fn new(title: &str) -> Self {
        Self {
            id: ItemId::new(),
            parent_id: None,
            link: Link::Empty,
            title: title.to_string(),
            nickname: normalize_nickname(title),
            nickname_pinned: false,
            active: false,
            html: None,
            before: String::new(),
            after: String::new(),
            data: BTreeMap::new(),
            options: Options::new(),
            item_attributes: Attributes::sorted(),
            link_attributes: Attributes::sorted(),
            container_attributes: Attributes::sorted(),
            dropdown: None,
        }
    }

    /// Arena identity, unique per created item.
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn parent_id(&self) -> Option<ItemId> {
        self.parent_id
    }

    pub(crate) fn set_parent_id(&mut self, parent_id: Option<ItemId>) {
        self.parent_id = parent_id;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // -- text --

    /// Display text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title; the nickname follows unless it was set explicitly.
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        if !self.nickname_pinned {
            self.nickname = normalize_nickname(title);
        }
        self.title = title.to_string();
        self
    }

    /// Lookup key, the normalized title unless set explicitly.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Set the lookup key; later title changes no longer touch it.
    pub fn set_nickname(&mut self, nickname: &str) -> &mut Self {
        self.nickname = normalize_nickname(nickname);
        self.nickname_pinned = true;
        self
    }

    /// Rendered-html override of the title.
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Set the html override, filling `%s` placeholders from `replacements`.
    pub fn set_html(&mut self, template: &str, replacements: &[&str]) -> &mut Self {
        let mut html = String::with_capacity(template.len());
        let mut rest = template;
        let mut values = replacements.iter();
        while let Some(pos) = rest.find("%s") {
            html.push_str(&rest[..pos]);
            match values.next() {
                Some(value) => html.push_str(value),
                None => html.push_str("%s"),
            }
            rest = &rest[pos + 2..];
        }
        html.push_str(rest);
        self.html = Some(html);
        self
    }

    /// Markup rendered before the title.
    pub fn before(&self) -> &str {
        &self.before
    }

    pub fn set_before(&mut self, before: &str) -> &mut Self {
        self.before = before.to_string();
        self
    }

    /// Markup rendered after the title.
    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn set_after(&mut self, after: &str) -> &mut Self {
        self.after = after.to_string();
        self
    }

    /// Free-form value stored under `name`.
    pub fn data(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    /// Store an arbitrary named field.
    pub fn set_data(&mut self, name: &str, value: &str) -> &mut Self {
        self.data.insert(name.to_string(), value.to_string());
        self
    }

    /// Value of a named property as used by menu filters.
    ///
    /// Known fields come first; anything else is looked up in the data map.
    pub fn property(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "parent_id" => self.parent_id.map(|id| id.to_string()),
            "title" => Some(self.title.clone()),
            "nickname" => Some(self.nickname.clone()),
            "active" => Some(self.active.to_string()),
            "html" => self.html.clone(),
            "link_type" => Some(self.link.link_type().to_string()),
            _ => self.data.get(name).cloned(),
        }
    }

    // -- links --

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Replace the link target.
    pub fn set_link(&mut self, link: Link) -> &mut Self {
        self.link = link;
        self
    }

    /// Link to a controller action.
    pub fn action(&mut self, name: &str, params: &[&str]) -> &mut Self {
        self.set_link(Link::action(name, params))
    }

    /// Link to a named route.
    pub fn route(&mut self, name: &str, params: &[&str]) -> &mut Self {
        self.set_link(Link::route(name, params))
    }

    /// Link to a path under the base URL.
    pub fn url(&mut self, path: &str, params: &[&str]) -> &mut Self {
        self.set_link(Link::url(path, params))
    }

    /// Link to a path forced onto plain http.
    pub fn insecure_url(&mut self, path: &str, params: &[&str]) -> &mut Self {
        self.set_link(Link::insecure_url(path, params))
    }

    /// Link outside the application; opens in a new window and is never active.
    pub fn external_url(&mut self, url: &str) -> &mut Self {
        self.set_link(Link::external(url));
        self.enable_option(options::OPEN_NEW_WINDOW);
        self.mark_active(false);
        self
    }

    pub fn generate_url(&self, resolver: &dyn UrlResolver) -> Result<String> {
        self.link.generate_url(resolver)
    }

    // -- attributes --

    /// Attribute set of one rendered element.
    pub fn attributes(&self, kind: AttributeKind) -> &Attributes {
        match kind {
            AttributeKind::Item => &self.item_attributes,
            AttributeKind::Link => &self.link_attributes,
            AttributeKind::Container => &self.container_attributes,
        }
    }

    pub fn attributes_mut(&mut self, kind: AttributeKind) -> &mut Attributes {
        match kind {
            AttributeKind::Item => &mut self.item_attributes,
            AttributeKind::Link => &mut self.link_attributes,
            AttributeKind::Container => &mut self.container_attributes,
        }
    }

    pub fn get_attribute(&self, kind: AttributeKind, name: &str) -> Option<&str> {
        self.attributes(kind).get(name)
    }

    /// Replace an attribute value.
    pub fn set_attribute(&mut self, kind: AttributeKind, name: &str, value: &str) -> &mut Self {
        self.attributes_mut(kind).set(name, value);
        self
    }

    /// Add a value; token attributes skip duplicates.
    pub fn add_attribute(&mut self, kind: AttributeKind, name: &str, value: &str) -> &mut Self {
        self.attributes_mut(kind).add(name, value);
        self
    }

    pub fn append_attribute(&mut self, kind: AttributeKind, name: &str, value: &str) -> &mut Self {
        self.attributes_mut(kind).append(name, value);
        self
    }

    pub fn prepend_attribute(
        &mut self,
        kind: AttributeKind,
        name: &str,
        value: &str,
    ) -> &mut Self {
        self.attributes_mut(kind).prepend(name, value);
        self
    }

    /// Remove a value, dropping the attribute once empty.
    pub fn remove_attribute(&mut self, kind: AttributeKind, name: &str, value: &str) -> &mut Self {
        self.attributes_mut(kind).remove(name, value);
        self
    }

    pub fn add_item_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.add_attribute(AttributeKind::Item, name, value)
    }

    pub fn add_link_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.add_attribute(AttributeKind::Link, name, value)
    }

    pub fn add_container_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.add_attribute(AttributeKind::Container, name, value)
    }

    // -- options --

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Rendering option by name.
    pub fn get_option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.options.set(name, value);
        self
    }

    /// Set an option to `true`.
    pub fn enable_option(&mut self, name: &str) -> &mut Self {
        self.options.enable(name);
        self
    }

    /// Boolean option read; missing options are `false`.
    pub fn option_enabled(&self, name: &str) -> bool {
        self.options.enabled(name)
    }

    // -- state --

    /// Set the active flag and class on this item only.
    pub(crate) fn mark_active(&mut self, active: bool) {
        self.active = active;
        if active {
            let kind = self.active_class_target();
            self.attributes_mut(kind).add("class", ACTIVE_CLASS);
        } else {
            self.item_attributes.remove("class", ACTIVE_CLASS);
            self.link_attributes.remove("class", ACTIVE_CLASS);
        }
    }

    fn active_class_target(&self) -> AttributeKind {
        if self.option_enabled(options::ACTIVE_ON_LINK) {
            AttributeKind::Link
        } else {
            AttributeKind::Item
        }
    }

    // -- dropdowns --

    /// Dropdown settings, when the item opens one.
    pub fn dropdown(&self) -> Option<&Dropdown> {
        self.dropdown.as_ref()
    }

    /// Render this item as a dropdown of the named menus.
    pub fn make_dropdown<I, S>(&mut self, menus: I, config: DropdownConfig) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dropdown = Some(Dropdown::new(menus, config));
        self
    }

    pub fn set_dropdown(&mut self, dropdown: Option<Dropdown>) -> &mut Self {
        self.dropdown = dropdown;
        self
    }
}

/// Lower-case, ASCII-folded form of a title used as its nickname.
pub fn normalize_nickname(value: &str) -> String {
    value
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::resolver::RouteTable;

    #[test]
    fn nickname_follows_title() {
        let mut item = Item::new("About Us");
        assert_eq!(item.nickname(), "about us");

        item.set_title("Contact");
        assert_eq!(item.nickname(), "contact");
    }

    #[test]
    fn explicit_nickname_sticks() {
        let mut item = Item::new("About");
        item.set_nickname("team");
        item.set_title("Our Team");
        assert_eq!(item.nickname(), "team");
    }

    #[test]
    fn explicit_nickname_equal_to_title_sticks() {
        let mut item = Item::new("About");
        item.set_nickname("about");
        item.set_title("Contact");
        assert_eq!(item.nickname(), "about");
    }

    #[test]
    fn nickname_is_ascii_folded() {
        assert_eq!(normalize_nickname("Café Crème"), "cafe creme");
        assert_eq!(normalize_nickname("ÜBER"), "uber");
    }

    #[test]
    fn html_placeholders() {
        let mut item = Item::new("Inbox");
        item.set_html("%s <span class=\"badge\">%s</span>", &["Inbox", "3"]);
        assert_eq!(item.html(), Some("Inbox <span class=\"badge\">3</span>"));

        item.set_html("<b>%s</b>", &[]);
        assert_eq!(item.html(), Some("<b>%s</b>"));
    }

    #[test]
    fn class_tokens_are_sorted_and_unique() {
        let mut item = Item::new("Home");
        item.add_item_attribute("class", "zeta alpha")
            .add_item_attribute("class", "alpha beta");
        assert_eq!(
            item.get_attribute(AttributeKind::Item, "class"),
            Some("alpha beta zeta")
        );

        item.remove_attribute(AttributeKind::Item, "class", "beta");
        assert_eq!(
            item.get_attribute(AttributeKind::Item, "class"),
            Some("alpha zeta")
        );
    }

    #[test]
    fn active_class_goes_to_item_or_link() {
        let mut item = Item::new("Home");
        item.mark_active(true);
        assert!(item.is_active());
        assert_eq!(item.get_attribute(AttributeKind::Item, "class"), Some("active"));

        let mut item = Item::new("Home");
        item.enable_option(options::ACTIVE_ON_LINK);
        item.mark_active(true);
        assert_eq!(item.get_attribute(AttributeKind::Item, "class"), None);
        assert_eq!(item.get_attribute(AttributeKind::Link, "class"), Some("active"));

        item.mark_active(false);
        assert!(!item.is_active());
        assert_eq!(item.get_attribute(AttributeKind::Link, "class"), None);
    }

    #[test]
    fn external_url_opens_new_window() {
        let mut item = Item::new("Docs");
        item.mark_active(true);
        item.external_url("docs.rs");

        assert!(!item.is_active());
        assert!(item.option_enabled(options::OPEN_NEW_WINDOW));
        let table = RouteTable::new("http://example.com").unwrap();
        assert_eq!(item.generate_url(&table).unwrap(), "http://docs.rs");
    }

    #[test]
    fn property_lookup() {
        let mut item = Item::new("Reports");
        item.route("reports", &[]).set_data("section", "admin");

        assert_eq!(item.property("title").as_deref(), Some("Reports"));
        assert_eq!(item.property("link_type").as_deref(), Some("route"));
        assert_eq!(item.property("active").as_deref(), Some("false"));
        assert_eq!(item.property("section").as_deref(), Some("admin"));
        assert_eq!(item.property("parent_id"), None);
        assert_eq!(item.property("unknown"), None);
    }

    #[test]
    fn item_ids_are_unique_and_parse() {
        let a = Item::new("a");
        let b = Item::new("b");
        assert_ne!(a.id(), b.id());
        let parsed: ItemId = a.id().to_string().parse().unwrap();
        assert_eq!(parsed, a.id());
    }
}
