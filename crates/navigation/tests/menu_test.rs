#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Menu and item model tests.
//!
//! Tree building, active-state propagation, attribute bags and queries.

use signpost::{AttributeKind, Item, Menu, OptionValue};

#[test]
fn test_set_active_marks_every_ancestor() {
    let mut menu = Menu::new("main");
    let mut top = menu.add("Top");
    let mut middle = top.add("Middle");
    let mut leaf = middle.add("Leaf");
    leaf.set_active(true);

    for title in ["top", "middle", "leaf"] {
        assert!(menu.get(title).unwrap().is_active(), "{title} should be active");
    }
}

#[test]
fn test_deactivation_leaves_ancestors_alone() {
    let mut menu = Menu::new("main");
    let mut top = menu.add("Top");
    top.add("Leaf").set_active(true);

    let leaf = menu.get("leaf").unwrap().id();
    menu.set_active(leaf, false, true);
    assert!(!menu.get("leaf").unwrap().is_active());
    assert!(menu.get("top").unwrap().is_active());
}

#[test]
fn test_class_add_is_idempotent_and_sorted() {
    let mut menu = Menu::new("main");
    let mut item = menu.add("Home");
    item.add_item_attribute("class", "foo");
    let once = item.get_attribute(AttributeKind::Item, "class").map(str::to_string);
    item.add_item_attribute("class", "foo");
    assert_eq!(
        item.get_attribute(AttributeKind::Item, "class").map(str::to_string),
        once
    );

    item.add_item_attribute("class", "bar zed");
    assert_eq!(
        item.get_attribute(AttributeKind::Item, "class"),
        Some("bar foo zed")
    );
}

#[test]
fn test_class_add_remove_round_trip() {
    let mut item = Item::new("Home");
    item.add_item_attribute("class", "btn");
    let before = item.attributes(AttributeKind::Item).clone();

    item.add_item_attribute("class", "foo")
        .remove_attribute(AttributeKind::Item, "class", "foo");
    assert_eq!(item.attributes(AttributeKind::Item), &before);
}

#[test]
fn test_plain_attribute_operations() {
    let mut item = Item::new("Home");
    item.add_attribute(AttributeKind::Link, "rel", "nofollow")
        .append_attribute(AttributeKind::Link, "rel", " noopener")
        .prepend_attribute(AttributeKind::Link, "rel", "external ");
    assert_eq!(
        item.get_attribute(AttributeKind::Link, "rel"),
        Some("external nofollow noopener")
    );

    item.remove_attribute(AttributeKind::Link, "rel", "nofollow");
    assert_eq!(
        item.get_attribute(AttributeKind::Link, "rel"),
        Some("external  noopener")
    );
}

#[test]
fn test_options_default_and_enable() {
    let mut item = Item::new("Home");
    assert!(!item.option_enabled("hide_children"));
    item.enable_option("hide_children");
    assert_eq!(item.get_option("hide_children"), Some(&OptionValue::Bool(true)));
}

#[test]
fn test_data_escape_hatch() {
    let mut menu = Menu::new("main");
    menu.add("Reports").set_data("icon", "chart");
    menu.add("Users").set_data("icon", "people");

    let item = menu.get_by("icon", "people").unwrap();
    assert_eq!(item.title(), "Users");
    assert_eq!(item.data("icon"), Some("people"));
    assert!(menu.get_by("icon", "missing").is_none());
}

#[test]
fn test_nickname_lookup() {
    let mut menu = Menu::new("main");
    menu.add("Über uns");
    menu.add("Contact").set_nickname("reach-us");

    assert_eq!(menu.get("uber uns").unwrap().title(), "Über uns");
    assert_eq!(menu.get("Reach-Us").unwrap().title(), "Contact");
    assert!(menu.get("contact").is_none());
}

#[test]
fn test_titles_need_not_be_unique() {
    let mut menu = Menu::new("main");
    menu.add("Home");
    menu.add("Home");
    assert_eq!(menu.filter("title", "Home", false).len(), 2);
    assert_eq!(menu.get("home").unwrap().id(), menu.first().unwrap().id());
}

#[test]
fn test_descendants_depth_first() {
    let mut menu = Menu::new("main");
    let mut a = menu.add("A");
    let mut b = a.add("B");
    b.add("C");
    a.add("D");

    let a = menu.get("a").unwrap().id();
    let titles: Vec<&str> = menu.descendants(a).into_iter().map(Item::title).collect();
    assert_eq!(titles, ["B", "C", "D"]);
    let children: Vec<&str> = menu.children(a).into_iter().map(Item::title).collect();
    assert_eq!(children, ["B", "D"]);
}

#[test]
fn test_where_eq_keeps_original() {
    let mut menu = Menu::new("main");
    menu.add_class("nav");
    menu.add("Public");
    menu.add("Secret").set_data("hidden", "yes");

    let hidden = menu.where_eq("hidden", "yes", false);
    assert_eq!(hidden.name(), "main_filtered");
    assert_eq!(hidden.count(), 1);
    assert_eq!(hidden.get_attribute("class"), Some("nav"));
    assert_eq!(hidden.original().unwrap().count(), 2);
}

#[test]
fn test_menu_style_tokens() {
    let mut menu = Menu::new("main");
    menu.set_style("color: red").add_style("display: flex");
    assert_eq!(
        menu.get_attribute("style"),
        Some("color: red;display: flex")
    );
    menu.set_class("navbar");
    assert_eq!(menu.get_attribute("class"), Some("navbar"));
}

#[test]
fn test_item_mut_relations() {
    let mut menu = Menu::new("main");
    let mut parent = menu.add("Parent");
    parent.add("Child");
    assert!(parent.has_children());
    assert_eq!(parent.children().len(), 1);
    assert!(parent.parent().is_none());
    assert_eq!(parent.menu().name(), "main");

    let child = menu.get("child").unwrap().id();
    let child = menu.item_mut(child).unwrap();
    assert_eq!(child.parent().unwrap().title(), "Parent");
}
