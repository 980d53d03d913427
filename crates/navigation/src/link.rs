//! Link targets an item can point at.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::{UrlResolver, external_url};

/// What an item links to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Link {
    #[default]
    Empty,
    Action {
        name: String,
        #[serde(default)]
        params: Vec<String>,
    },
    Route {
        name: String,
        #[serde(default)]
        params: Vec<String>,
    },
    Url {
        path: String,
        #[serde(default)]
        params: Vec<String>,
    },
    InsecureUrl {
        path: String,
        #[serde(default)]
        params: Vec<String>,
    },
    ExternalUrl {
        url: String,
    },
}

impl Link {
    pub fn action(name: &str, params: &[&str]) -> Self {
        Link::Action {
            name: name.to_string(),
            params: owned(params),
        }
    }

    pub fn route(name: &str, params: &[&str]) -> Self {
        Link::Route {
            name: name.to_string(),
            params: owned(params),
        }
    }

    pub fn url(path: &str, params: &[&str]) -> Self {
        Link::Url {
            path: path.to_string(),
            params: owned(params),
        }
    }

    pub fn insecure_url(path: &str, params: &[&str]) -> Self {
        Link::InsecureUrl {
            path: path.to_string(),
            params: owned(params),
        }
    }

    pub fn external(url: &str) -> Self {
        Link::ExternalUrl {
            url: url.to_string(),
        }
    }

    /// Name used when filtering items by `link_type`.
    pub fn link_type(&self) -> &'static str {
        match self {
            Link::Empty => "empty",
            Link::Action { .. } => "action",
            Link::Route { .. } => "route",
            Link::Url { .. } => "url",
            Link::InsecureUrl { .. } => "insecure_url",
            Link::ExternalUrl { .. } => "external_url",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Link::Empty)
    }

    /// Whether matching the current request URL can activate the item.
    ///
    /// External links never point into the application.
    pub fn activates(&self) -> bool {
        !matches!(self, Link::Empty | Link::ExternalUrl { .. })
    }

    /// Resolve the link into a URL; `Empty` yields an empty string.
    pub fn generate_url(&self, resolver: &dyn UrlResolver) -> Result<String> {
        match self {
            Link::Empty => Ok(String::new()),
            Link::Action { name, params } => resolver.action(name, params),
            Link::Route { name, params } => resolver.route(name, params),
            Link::Url { path, params } => resolver.url(path, params, resolver.prefers_secure()),
            Link::InsecureUrl { path, params } => resolver.url(path, params, false),
            Link::ExternalUrl { url } => Ok(external_url(url)),
        }
    }
}

fn owned(params: &[&str]) -> Vec<String> {
    params.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::NavigationError;
    use crate::resolver::RouteTable;

    fn table() -> RouteTable {
        RouteTable::new("http://example.com")
            .unwrap()
            .with_route("profile::edit-profile", "/profile/edit")
            .with_action("PageController@show", "/pages/:page")
    }

    #[test]
    fn empty_link_generates_nothing() {
        assert_eq!(Link::Empty.generate_url(&table()).unwrap(), "");
        assert!(Link::default().is_empty());
    }

    #[test]
    fn route_and_action_links() {
        let table = table();
        assert_eq!(
            Link::route("profile::edit-profile", &[])
                .generate_url(&table)
                .unwrap(),
            "http://example.com/profile/edit"
        );
        assert_eq!(
            Link::action("PageController@show", &["about"])
                .generate_url(&table)
                .unwrap(),
            "http://example.com/pages/about"
        );
    }

    #[test]
    fn url_follows_resolver_preference() {
        let secure = table().with_no_ssl(false);
        assert_eq!(
            Link::url("/account", &[]).generate_url(&secure).unwrap(),
            "https://example.com/account"
        );
        assert_eq!(
            Link::insecure_url("/account", &[])
                .generate_url(&secure)
                .unwrap(),
            "http://example.com/account"
        );
    }

    #[test]
    fn external_link_gets_scheme() {
        assert_eq!(
            Link::external("example.org").generate_url(&table()).unwrap(),
            "http://example.org"
        );
        assert!(!Link::external("example.org").activates());
    }

    #[test]
    fn unknown_route_propagates() {
        let err = Link::route("missing", &[])
            .generate_url(&table())
            .unwrap_err();
        assert_eq!(
            err,
            NavigationError::UnknownRoute {
                route: "missing".to_string()
            }
        );
    }

    #[test]
    fn deserializes_tagged_by_type() {
        let link: Link =
            serde_json::from_str(r#"{"type": "route", "name": "home"}"#).unwrap();
        assert_eq!(link, Link::route("home", &[]));
        assert_eq!(link.link_type(), "route");

        let link: Link = serde_json::from_str(r#"{"type": "empty"}"#).unwrap();
        assert!(link.is_empty());
    }
}
