//! Menus: ordered arenas of items.
//!
//! A [`Menu`] owns every item of its tree in insertion order. Items find
//! their parent by id, so rendering, filtering and active-state propagation
//! all walk the arena instead of holding references between items.

mod render;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::debug;

use crate::attributes::Attributes;
use crate::context::RenderContext;
use crate::item::{Item, ItemId, normalize_nickname};
use crate::options::{self, OptionValue, Options};
use crate::resolver::{UrlResolver, normalize_url_str};

use render::{Renderer, Selection};

/// A named tree of items.
#[derive(Debug, Clone)]
pub struct Menu {
    name: String,
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    attributes: Attributes,
    options: Options,
    data: BTreeMap<String, String>,
    original: Option<Arc<Menu>>,
}

impl Menu {
    /// An empty menu.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            items: Vec::new(),
            index: HashMap::new(),
            attributes: Attributes::ordered(),
            options: Options::new(),
            data: BTreeMap::new(),
            original: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // -- building --

    /// Add a top-level item.
    pub fn add(&mut self, title: &str) -> ItemMut<'_> {
        let index = self.push(Item::new(title));
        ItemMut { menu: self, index }
    }

    /// Add a child of `parent`. An unknown parent makes the item top-level.
    pub fn add_child(&mut self, parent: ItemId, title: &str) -> ItemMut<'_> {
        let mut item = Item::new(title);
        item.set_parent_id(Some(parent));
        let index = self.push(item);
        ItemMut { menu: self, index }
    }

    /// Append an existing item, keeping its id and parent.
    pub fn add_item(&mut self, item: Item) -> ItemMut<'_> {
        let index = self.push(item);
        ItemMut { menu: self, index }
    }

    fn push(&mut self, item: Item) -> usize {
        let index = self.items.len();
        self.index.insert(item.id(), index);
        self.items.push(item);
        index
    }

    // -- queries --

    /// Every item in insertion order, nested ones included.
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    /// Number of items at every depth.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First item added.
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    /// Last item added.
    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// Item by arena identity.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.index_of(id).map(|index| &self.items[index])
    }

    /// Mutable handle to the item with that identity.
    pub fn item_mut(&mut self, id: ItemId) -> Option<ItemMut<'_>> {
        let index = self.index_of(id)?;
        Some(ItemMut { menu: self, index })
    }

    /// Item by nickname; the argument is normalized like a title.
    pub fn get(&self, nickname: &str) -> Option<&Item> {
        let nickname = normalize_nickname(nickname);
        self.items.iter().find(|item| item.nickname() == nickname)
    }

    /// Mutable handle to the item with that nickname.
    pub fn get_mut(&mut self, nickname: &str) -> Option<ItemMut<'_>> {
        let nickname = normalize_nickname(nickname);
        let index = self
            .items
            .iter()
            .position(|item| item.nickname() == nickname)?;
        Some(ItemMut { menu: self, index })
    }

    /// First item whose `property` equals `value`.
    pub fn get_by(&self, property: &str, value: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.property(property).as_deref() == Some(value))
    }

    /// Items whose `property` equals `value`, in insertion order.
    ///
    /// With `include_children`, the descendants of each match follow it.
    /// Each item appears at most once.
    pub fn filter(&self, property: &str, value: &str, include_children: bool) -> Vec<&Item> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for item in &self.items {
            if item.property(property).as_deref() != Some(value) {
                continue;
            }
            if seen.insert(item.id()) {
                found.push(item);
            }
            if include_children {
                for descendant in self.descendants(item.id()) {
                    if seen.insert(descendant.id()) {
                        found.push(descendant);
                    }
                }
            }
        }

        found
    }

    /// A new menu named `{name}_filtered` holding copies of the matches.
    pub fn where_eq(&self, property: &str, value: &str, include_children: bool) -> Menu {
        let mut filtered = Menu::new(&format!("{}_filtered", self.name));
        filtered.attributes = self.attributes.clone();
        filtered.options = self.options.clone();
        for item in self.filter(property, value, include_children) {
            filtered.push(item.clone());
        }
        filtered.original = Some(Arc::new(self.clone()));
        filtered
    }

    /// The menu a filtered menu was derived from.
    pub fn original(&self) -> Option<&Menu> {
        self.original.as_deref()
    }

    /// Direct children of `id`, in order.
    pub fn children(&self, id: ItemId) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.parent_id() == Some(id))
            .collect()
    }

    pub fn has_children(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.parent_id() == Some(id))
    }

    /// All items below `id`, depth first.
    pub fn descendants(&self, id: ItemId) -> Vec<&Item> {
        let mut found = Vec::new();
        self.collect_descendants(id, &mut found);
        found
    }

    fn collect_descendants<'m>(&'m self, id: ItemId, found: &mut Vec<&'m Item>) {
        for child in self.items.iter().filter(|item| item.parent_id() == Some(id)) {
            found.push(child);
            self.collect_descendants(child.id(), found);
        }
    }

    /// Parent of `id`, `None` for top-level items.
    pub fn parent(&self, id: ItemId) -> Option<&Item> {
        self.item(id)?.parent_id().and_then(|parent| self.item(parent))
    }

    /// Number of ancestors of `id` inside this menu.
    pub fn depth(&self, id: ItemId) -> usize {
        self.index_of(id).map_or(0, |index| self.depth_at(index))
    }

    pub(crate) fn index_of(&self, id: ItemId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    fn depth_at(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut parent = self.items[index].parent_id();
        while let Some(id) = parent
            && let Some(parent_index) = self.index_of(id)
            && depth < self.items.len()
        {
            depth += 1;
            parent = self.items[parent_index].parent_id();
        }
        depth
    }

    fn child_indices(&self, id: ItemId) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.parent_id() == Some(id))
            .map(|(index, _)| index)
            .collect()
    }

    /// Items without a parent in this menu.
    fn root_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.parent_id().and_then(|p| self.index_of(p)).is_none())
            .map(|(index, _)| index)
            .collect()
    }

    // -- active state --

    /// Set an item's active flag; returns `false` for an unknown id.
    ///
    /// Activation with `update_parents` also activates every ancestor.
    /// Deactivation only ever touches the item itself.
    pub fn set_active(&mut self, id: ItemId, active: bool, update_parents: bool) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.set_active_at(index, active, update_parents);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_active_at(&mut self, index: usize, active: bool, update_parents: bool) {
        self.items[index].mark_active(active);
        if !(active && update_parents) {
            return;
        }

        let mut parent = self.items[index].parent_id();
        let mut remaining = self.items.len();
        while let Some(id) = parent
            && let Some(parent_index) = self.index_of(id)
            && remaining > 0
        {
            self.items[parent_index].mark_active(true);
            parent = self.items[parent_index].parent_id();
            remaining -= 1;
        }
    }

    /// Activate every linked item whose URL is `current_url`.
    ///
    /// Matching only ever activates; returns the number of matches.
    pub fn refresh_active_state(&mut self, resolver: &dyn UrlResolver, current_url: &str) -> usize {
        let current = normalize_url_str(current_url);
        let matches: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.link().activates())
            .filter(|(_, item)| {
                item.generate_url(resolver)
                    .is_ok_and(|url| normalize_url_str(&url) == current)
            })
            .map(|(index, _)| index)
            .collect();

        for &index in &matches {
            self.set_active_at(index, true, true);
        }
        if !matches.is_empty() {
            debug!(menu = %self.name, matches = matches.len(), "activated items from url");
        }
        matches.len()
    }

    // -- rendering --

    /// Render the menu: the top-level items inside the menu tag.
    pub fn render(&self, ctx: &RenderContext<'_>) -> String {
        let content = Renderer::new(ctx).render_menu(self, Selection::Roots);
        let tag = self.options.text_or(options::TAG, "ul");
        ctx.serializer().element(tag, &content, &self.attributes)
    }

    /// Render only the children of `parent`, without a wrapping tag.
    pub fn render_from(&self, parent: ItemId, ctx: &RenderContext<'_>) -> String {
        Renderer::new(ctx).render_menu(self, Selection::ChildrenOf(parent))
    }

    // -- attributes --

    /// Attributes of the menu container.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.set(name, value);
        self
    }

    pub fn add_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.add(name, value);
        self
    }

    pub fn append_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.append(name, value);
        self
    }

    pub fn prepend_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.prepend(name, value);
        self
    }

    pub fn remove_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.remove(name, value);
        self
    }

    pub fn add_class(&mut self, class: &str) -> &mut Self {
        self.add_attribute("class", class)
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.remove_attribute("class", class)
    }

    pub fn set_class(&mut self, class: &str) -> &mut Self {
        self.set_attribute("class", class)
    }

    pub fn add_style(&mut self, style: &str) -> &mut Self {
        self.add_attribute("style", style)
    }

    pub fn remove_style(&mut self, style: &str) -> &mut Self {
        self.remove_attribute("style", style)
    }

    pub fn set_style(&mut self, style: &str) -> &mut Self {
        self.set_attribute("style", style)
    }

    // -- options and data --

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Menu-wide rendering option.
    pub fn get_option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn set_option(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.options.set(name, value);
        self
    }

    /// Set a flag option to `true`.
    pub fn enable_option(&mut self, name: &str) -> &mut Self {
        self.options.enable(name);
        self
    }

    pub fn option_enabled(&self, name: &str) -> bool {
        self.options.enabled(name)
    }

    /// Free-form value stored on the menu.
    pub fn data(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }

    pub fn set_data(&mut self, name: &str, value: &str) -> &mut Self {
        self.data.insert(name.to_string(), value.to_string());
        self
    }
}

/// Mutable handle to an item inside its menu.
///
/// Dereferences to [`Item`]; adds the operations that need the rest of the
/// tree (children, parent activation).
pub struct ItemMut<'m> {
    menu: &'m mut Menu,
    index: usize,
}

impl<'m> ItemMut<'m> {
    /// Add a child item under this one.
    pub fn add(&mut self, title: &str) -> ItemMut<'_> {
        let parent = self.id();
        self.menu.add_child(parent, title)
    }

    /// Set the active flag, activating ancestors when `active`.
    pub fn set_active(&mut self, active: bool) -> &mut Self {
        self.set_active_with(active, true)
    }

    /// Set the active flag, optionally on every ancestor too.
    pub fn set_active_with(&mut self, active: bool, update_parents: bool) -> &mut Self {
        self.menu.set_active_at(self.index, active, update_parents);
        self
    }

    pub fn has_children(&self) -> bool {
        self.menu.has_children(self.id())
    }

    pub fn children(&self) -> Vec<&Item> {
        self.menu.children(self.id())
    }

    /// Parent of this item.
    pub fn parent(&self) -> Option<&Item> {
        self.menu.parent(self.id())
    }

    /// Menu owning this item.
    pub fn menu(&self) -> &Menu {
        self.menu
    }

    /// Give up the handle, keeping the item borrow.
    pub fn into_item(self) -> &'m mut Item {
        &mut self.menu.items[self.index]
    }
}

impl Deref for ItemMut<'_> {
    type Target = Item;

    fn deref(&self) -> &Item {
        &self.menu.items[self.index]
    }
}

impl DerefMut for ItemMut<'_> {
    fn deref_mut(&mut self) -> &mut Item {
        &mut self.menu.items[self.index]
    }
}
