//! Registry of named menus.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use tracing::debug;

use crate::context::{RenderContext, ViewShare};
use crate::error::{NavigationError, Result};
use crate::item::Item;
use crate::menu::Menu;
use crate::options;
use crate::resolver::UrlResolver;

/// Named menus of an application, passed to whatever needs them.
#[derive(Default)]
pub struct Navigation {
    menus: BTreeMap<String, Menu>,
    views: Option<Box<dyn ViewShare>>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share every menu created from now on with `views`.
    pub fn with_view_share(mut self, views: impl ViewShare + 'static) -> Self {
        self.views = Some(Box::new(views));
        self
    }

    pub fn set_view_share(&mut self, views: Option<Box<dyn ViewShare>>) {
        self.views = views;
    }

    /// Create and register an empty menu, replacing any menu of that name.
    pub fn create_menu(&mut self, name: &str) -> &mut Menu {
        self.create_menu_with(name, |_| {})
    }

    /// Create a menu, fill it with `build`, share it and register it.
    ///
    /// A menu already registered under `name` is replaced.
    pub fn create_menu_with<F>(&mut self, name: &str, build: F) -> &mut Menu
    where
        F: FnOnce(&mut Menu),
    {
        let mut menu = Menu::new(name);
        build(&mut menu);

        if let Some(views) = self.views.as_mut() {
            views.share(name, &menu);
        }

        match self.menus.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                debug!(menu = %name, items = menu.count(), "replaced menu");
                entry.insert(menu);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(menu = %name, items = menu.count(), "created menu");
                entry.insert(menu)
            }
        }
    }

    pub fn get_menu(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    pub fn get_menu_mut(&mut self, name: &str) -> Option<&mut Menu> {
        self.menus.get_mut(name)
    }

    /// Whether a menu of that name exists and has at least one item.
    pub fn has(&self, name: &str) -> bool {
        self.menus.get(name).is_some_and(|menu| !menu.is_empty())
    }

    /// Registered menus in name order.
    pub fn menus(&self) -> impl Iterator<Item = &Menu> {
        self.menus.values()
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Item addressed as `menu.nickname`.
    pub fn get_menu_item(&self, path: &str) -> Result<&Item> {
        let (menu_name, nickname) = path
            .split_once('.')
            .ok_or_else(|| NavigationError::InvalidItemPath {
                path: path.to_string(),
            })?;
        let menu = self
            .get_menu(menu_name)
            .ok_or_else(|| NavigationError::menu_not_found(menu_name))?;
        menu.get(nickname)
            .ok_or_else(|| NavigationError::item_not_found(menu_name, nickname))
    }

    /// Copy `items` into the named menu, creating the menu when missing.
    pub fn add_to_menu<I>(&mut self, name: &str, items: I) -> &mut Menu
    where
        I: IntoIterator<Item = Item>,
    {
        if !self.menus.contains_key(name) {
            self.create_menu(name);
        }
        let menu = self
            .menus
            .entry(name.to_string())
            .or_insert_with(|| Menu::new(name));
        let before = menu.count();
        for item in items {
            menu.add_item(item);
        }
        debug!(menu = %name, added = menu.count() - before, "added items to menu");
        menu
    }

    /// Render a registered menu with this navigation available for
    /// cross-menu lookups and dropdowns.
    pub fn render_menu(&self, name: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let menu = self
            .get_menu(name)
            .ok_or_else(|| NavigationError::menu_not_found(name))?;
        let ctx = ctx.clone().with_navigation(self);
        Ok(menu.render(&ctx))
    }

    /// Activate items from the current URL across all menus.
    ///
    /// After URL matching, items whose `active_if_item_is_active`
    /// references are active are activated too, until nothing changes.
    /// Returns the number of items activated.
    pub fn refresh_active_state(&mut self, resolver: &dyn UrlResolver, current_url: &str) -> usize {
        let mut activated = 0;
        for menu in self.menus.values_mut() {
            activated += menu.refresh_active_state(resolver, current_url);
        }

        // Items are only ever activated here; stop after a pass with no change.
        loop {
            let mut changed = 0;
            for (menu_name, index) in self.pending_references() {
                if let Some(menu) = self.menus.get_mut(&menu_name) {
                    menu.set_active_at(index, true, true);
                    changed += 1;
                }
            }
            if changed == 0 {
                break;
            }
            activated += changed;
        }

        activated
    }

    /// Arena positions of inactive items with at least one active reference.
    /// A menu may hold several copies of one item, each with its own position.
    fn pending_references(&self) -> Vec<(String, usize)> {
        let mut pending = Vec::new();
        for menu in self.menus.values() {
            for (index, item) in menu.all().iter().enumerate() {
                if item.is_active() {
                    continue;
                }
                let referenced = item
                    .options()
                    .list(options::ACTIVE_IF_ITEM_IS_ACTIVE)
                    .iter()
                    .any(|reference| {
                        resolve_reference(menu, Some(self), reference).is_some_and(Item::is_active)
                    });
                if referenced {
                    pending.push((menu.name().to_string(), index));
                }
            }
        }
        pending
    }
}

impl fmt::Debug for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigation")
            .field("menus", &self.menus.keys().collect::<Vec<_>>())
            .field("views", &self.views.is_some())
            .finish()
    }
}

/// Find the item a reference names: a nickname in `menu`, or
/// `menu.nickname` in a registered menu.
pub(crate) fn resolve_reference<'m>(
    menu: &'m Menu,
    navigation: Option<&'m Navigation>,
    reference: &str,
) -> Option<&'m Item> {
    if let Some(item) = menu.get(reference) {
        return Some(item);
    }
    let (menu_name, nickname) = reference.split_once('.')?;
    if menu_name == menu.name() {
        return menu.get(nickname);
    }
    navigation?.get_menu(menu_name)?.get(nickname)
}
