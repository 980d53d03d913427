//! Markup generation for menus.
//!
//! Rendering works on a clone of the menu so that render-time activation
//! and item callbacks never change the registered menus. Items are rendered
//! recursively; each level hands its item tag and callback down to its
//! children.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Menu;
use crate::attributes::{AttributeKind, Attributes};
use crate::context::RenderContext;
use crate::dropdown::{self, Dropdown, DropdownConfig};
use crate::html::html_escape;
use crate::item::{Item, ItemId};
use crate::navigation::resolve_reference;
use crate::options::{self, ItemCallback};
use crate::ordinal::ordinal;

/// Nesting level of top-level items; their children container is the
/// "second level".
const TOP_LEVEL: usize = 2;

/// Class added to the item whose URL is the current request URL.
const ACTUAL_LINK_CLASS: &str = "actual-link";

/// Which items of a menu to render.
pub(super) enum Selection {
    Roots,
    ChildrenOf(ItemId),
}

pub(super) struct Renderer<'c, 'a> {
    ctx: &'c RenderContext<'a>,
    /// Names of the menus currently being rendered, outermost first.
    stack: Vec<String>,
}

impl<'c, 'a> Renderer<'c, 'a> {
    pub(super) fn new(ctx: &'c RenderContext<'a>) -> Self {
        Self {
            ctx,
            stack: Vec::new(),
        }
    }

    pub(super) fn render_menu(&mut self, menu: &Menu, selection: Selection) -> String {
        self.render_entries(menu, selection, None)
    }

    /// Render the selected items of a working copy of `menu`.
    ///
    /// `entry` is set when the menu renders inside a dropdown panel.
    fn render_entries(
        &mut self,
        menu: &Menu,
        selection: Selection,
        entry: Option<&DropdownConfig>,
    ) -> String {
        self.stack.push(menu.name().to_string());

        let mut working = menu.clone();
        if let Some(url) = self.ctx.current_url() {
            working.refresh_active_state(self.ctx.resolver(), url);
        }

        let (indices, level) = match selection {
            Selection::Roots => (working.root_indices(), TOP_LEVEL),
            Selection::ChildrenOf(parent) => match working.index_of(parent) {
                Some(index) => (
                    working.child_indices(parent),
                    working.depth_at(index) + TOP_LEVEL + 1,
                ),
                None => (Vec::new(), TOP_LEVEL),
            },
        };

        let menu_options = working.options();
        let item_tag = match entry {
            Some(config) => config.entry_tag.clone(),
            None => menu_options.text_or(options::ITEM_TAG, "li").to_string(),
        };
        let callback = chain(
            menu_options.callback(options::ITEM_CALLBACK),
            entry.map(entry_callback),
        );
        let container_tag = menu_options.text_or(options::TAG, "ul").to_string();
        let text_only = menu_options.enabled(options::TEXT_ONLY);
        let span_text = menu_options.enabled(options::SPAN_TEXT);

        let mut html = String::new();
        for index in indices {
            let item = &mut working.items[index];
            if text_only {
                item.enable_option(options::TEXT_ONLY);
            }
            if span_text {
                item.enable_option(options::SPAN_TEXT);
            }
            if item.get_option(options::CONTAINER_TAG).is_none() {
                item.set_option(options::CONTAINER_TAG, container_tag.as_str());
            }
            hand_down(item, &item_tag, callback.as_ref());
            html.push_str(&self.render_item(&mut working, index, level));
        }

        self.stack.pop();
        html
    }

    fn render_item(&mut self, menu: &mut Menu, index: usize, level: usize) -> String {
        let activate = {
            let item = &menu.items[index];
            !item.is_active()
                && item
                    .options()
                    .list(options::ACTIVE_IF_ITEM_IS_ACTIVE)
                    .iter()
                    .any(|reference| self.reference_active(menu, reference))
        };
        if activate {
            menu.set_active_at(index, true, true);
        }

        if !self.is_visible(menu, index) {
            return String::new();
        }

        let item = &menu.items[index];
        let opts = item.options();
        let text_only = opts.enabled(options::TEXT_ONLY);
        let no_title = opts.enabled(options::NO_TITLE);
        let span_text = opts.enabled(options::SPAN_TEXT);
        let new_window = opts.enabled(options::OPEN_NEW_WINDOW);
        let hide_children = opts.enabled(options::HIDE_CHILDREN);
        let force_inactive = opts.enabled(options::FORCE_INACTIVE);
        let tag = opts.text_or(options::TAG, "li").to_string();
        let container_tag = opts.text_or(options::CONTAINER_TAG, "ul").to_string();
        let container_class = opts.text_or(options::CONTAINER_CLASS, "nav").to_string();
        let callback = opts.callback(options::ITEM_CALLBACK);
        let dropdown = item.dropdown().cloned();

        let body = match item.html() {
            Some(html) if !text_only => html.to_string(),
            _ => html_escape(item.title()),
        };

        if force_inactive {
            menu.items[index].mark_active(false);
        }

        let panel = match &dropdown {
            Some(dropdown) => self.render_dropdown(menu, index, dropdown),
            None => String::new(),
        };

        let serializer = self.ctx.serializer();
        let item = &menu.items[index];
        let href = (!item.link().is_empty()).then(|| self.href(item));
        let link_attributes = item.attributes(AttributeKind::Link);

        let mut markup = if let Some(href) = &href {
            let mut attrs = if text_only {
                Attributes::sorted()
            } else {
                link_attributes.clone()
            };
            attrs.set("href", href.as_str());
            if !no_title {
                attrs.set("title", item.title());
            }
            if new_window {
                attrs.set("target", "_blank");
            }
            serializer.element("a", &body, &attrs)
        } else if !item.title().is_empty()
            && (span_text || (!text_only && !link_attributes.is_empty()))
        {
            let mut attrs = if text_only {
                Attributes::sorted()
            } else {
                link_attributes.clone()
            };
            if !no_title {
                attrs.set("title", item.title());
            }
            serializer.element("span", &body, &attrs)
        } else {
            body
        };
        markup.push_str(&panel);

        let id = item.id();
        let children = menu.child_indices(id);
        if !hide_children && !children.is_empty() {
            let mut inner = String::new();
            for &child in &children {
                hand_down(&mut menu.items[child], &tag, callback.as_ref());
                inner.push_str(&self.render_item(menu, child, level + 1));
            }

            if !inner.is_empty() {
                let mut attrs = menu.items[index]
                    .attributes(AttributeKind::Container)
                    .clone();
                attrs.add("class", &container_class);
                attrs.add(
                    "class",
                    &format!("{container_class}-{}-level", ordinal(level)),
                );
                markup.push_str(&serializer.element(&container_tag, &inner, &attrs));
            }
        }

        if children.is_empty()
            && let Some(href) = &href
            && self.ctx.is_current(href)
        {
            menu.items[index].add_item_attribute("class", ACTUAL_LINK_CLASS);
        }

        let item = &menu.items[index];
        let content = format!("{}{markup}{}", item.before(), item.after());
        serializer.element(&tag, &content, item.attributes(AttributeKind::Item))
    }

    fn is_visible(&self, menu: &Menu, index: usize) -> bool {
        let item = &menu.items[index];
        let opts = item.options();

        if let Some(authorizer) = self.ctx.authorizer()
            && let Some(ability) = opts.text(options::PERMISSION)
            && !authorizer.allows(ability, opts.text(options::PERMISSION_SUBJECT))
        {
            debug!(item = %item.title(), ability, "item hidden by authorizer");
            return false;
        }

        let active = item.is_active();
        let required = opts.list(options::HIDE_IF_ITEM_NOT_ACTIVE);
        if !required.is_empty()
            && !active
            && !required
                .iter()
                .any(|reference| self.reference_active(menu, reference))
        {
            return false;
        }

        if opts.enabled(options::HIDE_IF_NOT_ACTIVE) && !active {
            return false;
        }
        if opts.enabled(options::HIDE_IF_ACTIVE) && active {
            return false;
        }
        true
    }

    /// Whether the item named by `reference` is active or is the current page.
    fn reference_active(&self, menu: &Menu, reference: &str) -> bool {
        resolve_reference(menu, self.ctx.navigation(), reference)
            .is_some_and(|item| item.is_active() || self.is_current(item))
    }

    fn is_current(&self, item: &Item) -> bool {
        self.ctx.current_url().is_some()
            && item.link().activates()
            && item
                .generate_url(self.ctx.resolver())
                .is_ok_and(|url| self.ctx.is_current(&url))
    }

    fn href(&self, item: &Item) -> String {
        match item.generate_url(self.ctx.resolver()) {
            Ok(url) => url,
            Err(e) => {
                warn!(item = %item.title(), error = %e, "failed to generate item url");
                "#".to_string()
            }
        }
    }

    fn render_dropdown(&mut self, menu: &mut Menu, index: usize, dropdown: &Dropdown) -> String {
        dropdown::apply_toggle(&mut menu.items[index], &dropdown.config);

        let Some(navigation) = self.ctx.navigation() else {
            warn!(
                item = %menu.items[index].title(),
                "dropdown rendered without a navigation; panel skipped"
            );
            return String::new();
        };

        let mut entries = String::new();
        for name in &dropdown.menus {
            if self.stack.iter().any(|open| open == name) {
                warn!(menu = %name, "skipping dropdown menu already being rendered");
                continue;
            }
            let Some(source) = navigation.get_menu(name) else {
                warn!(menu = %name, "dropdown menu not found");
                continue;
            };
            entries.push_str(&self.render_entries(
                source,
                Selection::Roots,
                Some(&dropdown.config),
            ));
        }

        let toggle_id = dropdown::toggle_id(&menu.items[index]);
        self.ctx
            .serializer()
            .element("div", &entries, &dropdown.panel_attributes(&toggle_id))
    }
}

/// Give a child the item tag and callback of the level above it.
///
/// An explicit `tag` option on the child wins; the callback runs on the
/// child and is kept so it reaches the child's own children.
fn hand_down(item: &mut Item, tag: &str, callback: Option<&ItemCallback>) {
    if item.get_option(options::TAG).is_none() {
        item.set_option(options::TAG, tag);
    }
    if let Some(callback) = callback {
        callback(item);
        let combined = chain(
            Some(Arc::clone(callback)),
            item.options().callback(options::ITEM_CALLBACK),
        );
        if let Some(combined) = combined {
            item.set_option(options::ITEM_CALLBACK, combined);
        }
    }
}

/// Callback adding the dropdown entry class to each entry link.
fn entry_callback(config: &DropdownConfig) -> ItemCallback {
    let class = config.entry_class.clone();
    Arc::new(move |item: &mut Item| {
        item.add_link_attribute("class", &class);
    })
}

fn chain(first: Option<ItemCallback>, second: Option<ItemCallback>) -> Option<ItemCallback> {
    match (first, second) {
        (Some(a), Some(b)) if Arc::ptr_eq(&a, &b) => Some(a),
        (Some(a), Some(b)) => Some(Arc::new(move |item: &mut Item| {
            a(item);
            b(item);
        })),
        (a, None) => a,
        (None, b) => b,
    }
}
