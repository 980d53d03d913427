//! Signpost test utilities.
//!
//! Helpers for integration testing: route and user fixtures, a recording
//! view sink, sample navigations and markup assertions.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use signpost::{Menu, Navigation, PermissionSet, RouteTable, ViewShare};

/// Base URL of the test route table.
pub const BASE_URL: &str = "http://localhost";

/// Route table with the routes used across the tests.
pub fn test_routes() -> RouteTable {
    RouteTable::new(BASE_URL)
        .unwrap_or_else(|e| panic!("test base url must parse: {e}"))
        .with_route("home", "/")
        .with_route("profile", "/profile")
        .with_route("profile::edit-profile", "/profile/edit")
        .with_route("blog.post", "/blog/:slug")
        .with_route("search", "/search/{term?}")
        .with_action("UserController@show", "/users/{id}")
}

/// Absolute URL of `path` under the test base URL.
pub fn test_url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

/// Create a user holding the given abilities.
pub fn test_user(permissions: &[&str]) -> PermissionSet {
    PermissionSet::new(permissions.iter().copied())
}

/// Create an anonymous test user.
pub fn anonymous_user() -> PermissionSet {
    PermissionSet::anonymous()
}

/// Create an admin test user.
pub fn admin_user() -> PermissionSet {
    PermissionSet::admin()
}

/// View sink that records the names of shared menus.
#[derive(Debug, Clone, Default)]
pub struct RecordingViews {
    shared: Rc<RefCell<Vec<(String, usize)>>>,
}

impl RecordingViews {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the shared menus, in sharing order.
    pub fn names(&self) -> Vec<String> {
        self.shared
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Item count of each menu at the time it was shared.
    pub fn counts(&self) -> Vec<usize> {
        self.shared.borrow().iter().map(|(_, count)| *count).collect()
    }
}

impl ViewShare for RecordingViews {
    fn share(&mut self, name: &str, menu: &Menu) {
        self.shared
            .borrow_mut()
            .push((name.to_string(), menu.count()));
    }
}

/// Navigation with a `main` menu and an `account` menu.
///
/// `main`: Home, Blog (with child Hello World), Profile (with child Edit
/// Profile). `account`: Settings, Sign out.
pub fn sample_navigation() -> Navigation {
    let mut nav = Navigation::new();
    nav.create_menu_with("main", |menu| {
        menu.add_class("nav");
        menu.add("Home").route("home", &[]);
        let mut blog = menu.add("Blog");
        blog.url("/blog", &[]);
        blog.add("Hello World").route("blog.post", &["hello-world"]);
        let mut profile = menu.add("Profile");
        profile.route("profile", &[]);
        profile.add("Edit Profile").route("profile::edit-profile", &[]);
    });
    nav.create_menu_with("account", |menu| {
        menu.add("Settings").url("/settings", &[]);
        menu.add("Sign out").url("/logout", &[]);
    });
    nav
}

/// Definition source for the sample navigation, as JSON.
pub fn sample_definition_json() -> String {
    json!({
        "base_url": BASE_URL,
        "routes": {
            "home": "/",
            "profile": "/profile",
            "profile::edit-profile": "/profile/edit"
        },
        "menus": [
            {
                "name": "main",
                "attributes": {"class": "nav"},
                "items": [
                    {"title": "Home", "link": {"type": "route", "name": "home"}},
                    {
                        "title": "Profile",
                        "link": {"type": "route", "name": "profile"},
                        "children": [
                            {
                                "title": "Edit Profile",
                                "link": {"type": "route", "name": "profile::edit-profile"}
                            }
                        ]
                    }
                ]
            }
        ]
    })
    .to_string()
}

/// The same definition as [`sample_definition_json`], as TOML.
pub fn sample_definition_toml() -> &'static str {
    r#"
base_url = "http://localhost"

[routes]
home = "/"
profile = "/profile"
"profile::edit-profile" = "/profile/edit"

[[menus]]
name = "main"
attributes = { class = "nav" }

[[menus.items]]
title = "Home"
link = { type = "route", name = "home" }

[[menus.items]]
title = "Profile"
link = { type = "route", name = "profile" }

[[menus.items.children]]
title = "Edit Profile"
link = { type = "route", name = "profile::edit-profile" }
"#
}

/// Assertion helpers for rendered markup.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that the needles appear in the haystack in the given order.
    pub fn in_order(haystack: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match haystack[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("Expected '{needle}' after position {from}\nActual: {haystack}"),
            }
        }
    }
}
