#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Definition loading tests.
//!
//! JSON and TOML sources load into navigations that render like menus
//! built in code.

use signpost::{Navigation, NavigationDefinition, RenderContext};
use signpost_test_utils::{
    assert, sample_definition_json, sample_definition_toml, test_routes, test_url, test_user,
};

fn render(definition: &NavigationDefinition, current: &str) -> String {
    let routes = definition.route_table().unwrap();
    let nav = Navigation::from_definition(definition);
    let ctx = RenderContext::new(&routes).with_current_url(&test_url(current));
    nav.render_menu("main", &ctx).unwrap()
}

#[test]
fn test_json_and_toml_render_the_same() {
    let json = NavigationDefinition::from_json_str(&sample_definition_json()).unwrap();
    let toml = NavigationDefinition::from_toml_str(sample_definition_toml()).unwrap();
    assert_eq!(render(&json, "/profile/edit"), render(&toml, "/profile/edit"));
}

#[test]
fn test_loaded_menu_matches_code_built_menu() {
    let definition = NavigationDefinition::from_json_str(&sample_definition_json()).unwrap();
    let html = render(&definition, "/profile/edit");

    let mut nav = Navigation::new();
    nav.create_menu_with("main", |menu| {
        menu.add_class("nav");
        menu.add("Home").route("home", &[]);
        let mut profile = menu.add("Profile");
        profile.route("profile", &[]);
        profile.add("Edit Profile").route("profile::edit-profile", &[]);
    });
    let routes = test_routes();
    let ctx = RenderContext::new(&routes).with_current_url(&test_url("/profile/edit"));
    assert_eq!(html, nav.render_menu("main", &ctx).unwrap());
    assert::contains(&html, "<li class=\"active actual-link\">");
}

#[test]
fn test_definition_features() {
    let source = r#"
base_url = "https://example.com"
no_ssl = false

[[menus]]
name = "main"
options = { tag = "ol", item_tag = "div" }

[[menus.items]]
title = "Docs"
link = { type = "url", path = "/docs", params = ["intro"] }
item_attributes = { class = "docs" }
data = { icon = "book" }

[[menus.items]]
title = "Admin"
link = { type = "url", path = "/admin" }
permission = "administer site"

[[menus.items]]
title = "Crates"
link = { type = "external_url", url = "crates.io" }

[[menus.items]]
title = "Status"
active = true
"#;
    let definition = NavigationDefinition::from_toml_str(source).unwrap();
    let routes = definition.route_table().unwrap();
    let nav = Navigation::from_definition(&definition);

    let menu = nav.get_menu("main").unwrap();
    assert_eq!(menu.get_by("icon", "book").unwrap().title(), "Docs");
    assert!(nav.get_menu_item("main.status").unwrap().is_active());

    let user = test_user(&[]);
    let ctx = RenderContext::new(&routes).with_authorizer(&user);
    let html = nav.render_menu("main", &ctx).unwrap();
    assert::in_order(
        &html,
        &[
            "<ol>",
            "<div class=\"docs\"><a href=\"https://example.com/docs/intro\"",
            "<a href=\"http://crates.io\" target=\"_blank\"",
            "<div class=\"active\">Status</div>",
            "</ol>",
        ],
    );
    assert::not_contains(&html, "Admin");
}

#[test]
fn test_loading_replaces_menus() {
    let mut nav = Navigation::new();
    nav.create_menu_with("main", |menu| {
        menu.add("Old");
    });
    let definition = NavigationDefinition::from_json_str(&sample_definition_json()).unwrap();
    nav.load(&definition);

    let menu = nav.get_menu("main").unwrap();
    assert!(menu.get("old").is_none());
    assert_eq!(menu.count(), 3);
}

#[test]
fn test_malformed_sources_are_errors() {
    assert!(NavigationDefinition::from_json_str("{\"menus\": 3}").is_err());
    assert!(NavigationDefinition::from_toml_str("menus = [[").is_err());
}
