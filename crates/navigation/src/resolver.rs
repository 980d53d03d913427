//! URL generation for item links.
//!
//! The web framework's router is an external collaborator; [`UrlResolver`]
//! is the narrow interface items call through. [`RouteTable`] is a
//! standalone implementation over a base URL and named route patterns.

use std::collections::BTreeMap;

use tracing::debug;
use url::Url;

use crate::error::{NavigationError, Result};

/// Resolves link targets into URLs.
pub trait UrlResolver {
    /// URL of the route bound to a controller action.
    fn action(&self, name: &str, params: &[String]) -> Result<String>;

    /// URL of a named route.
    fn route(&self, name: &str, params: &[String]) -> Result<String>;

    /// Absolute URL for an application path; `secure` forces https.
    fn url(&self, path: &str, params: &[String], secure: bool) -> Result<String>;

    /// Whether plain URL links should be generated as https.
    fn prefers_secure(&self) -> bool {
        false
    }
}

/// Resolver over a base URL and named route/action patterns.
///
/// Patterns use `:name` or `{name}` placeholders (`{name?}` is optional),
/// filled from the parameters in order. Parameters left over are appended
/// as a query string.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: Url,
    no_ssl: bool,
    routes: BTreeMap<String, String>,
    actions: BTreeMap<String, String>,
}

impl RouteTable {
    /// Create a route table rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base =
            Url::parse(base_url).map_err(|e| NavigationError::invalid_url(base_url, e))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            base,
            no_ssl: true,
            routes: BTreeMap::new(),
            actions: BTreeMap::new(),
        })
    }

    /// Generate plain URL links without forcing https (default `true`).
    pub fn with_no_ssl(mut self, no_ssl: bool) -> Self {
        self.no_ssl = no_ssl;
        self
    }

    pub fn with_route(mut self, name: &str, pattern: &str) -> Self {
        self.add_route(name, pattern);
        self
    }

    pub fn with_action(mut self, name: &str, pattern: &str) -> Self {
        self.add_action(name, pattern);
        self
    }

    pub fn add_route(&mut self, name: &str, pattern: &str) {
        self.routes.insert(name.to_string(), pattern.to_string());
    }

    pub fn add_action(&mut self, name: &str, pattern: &str) {
        self.actions.insert(name.to_string(), pattern.to_string());
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Join an application path (with optional query) onto the base URL.
    fn absolute(&self, path: &str, secure: bool) -> Result<String> {
        let mut url = if has_scheme(path) {
            Url::parse(path).map_err(|e| NavigationError::invalid_url(path, e))?
        } else {
            self.base
                .join(path.trim_start_matches('/'))
                .map_err(|e| NavigationError::invalid_url(path, e))?
        };

        if secure && url.scheme() == "http" && url.set_scheme("https").is_err() {
            return Err(NavigationError::invalid_url(
                path,
                "cannot switch scheme to https",
            ));
        }

        Ok(normalize_url(&url))
    }
}

impl UrlResolver for RouteTable {
    fn action(&self, name: &str, params: &[String]) -> Result<String> {
        let pattern = self
            .actions
            .get(name)
            .ok_or_else(|| NavigationError::UnknownAction {
                action: name.to_string(),
            })?;
        let path = fill_pattern(name, pattern, params)?;
        self.absolute(&path, false)
    }

    fn route(&self, name: &str, params: &[String]) -> Result<String> {
        let pattern = self
            .routes
            .get(name)
            .ok_or_else(|| NavigationError::UnknownRoute {
                route: name.to_string(),
            })?;
        let path = fill_pattern(name, pattern, params)?;
        debug!(route = %name, path = %path, "resolved route");
        self.absolute(&path, false)
    }

    fn url(&self, path: &str, params: &[String], secure: bool) -> Result<String> {
        self.absolute(&append_segments(path, params), secure)
    }

    fn prefers_secure(&self) -> bool {
        !self.no_ssl
    }
}

/// Pass-through resolver for relative links; knows no routes or actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelativeUrls;

impl UrlResolver for RelativeUrls {
    fn action(&self, name: &str, _params: &[String]) -> Result<String> {
        Err(NavigationError::UnknownAction {
            action: name.to_string(),
        })
    }

    fn route(&self, name: &str, _params: &[String]) -> Result<String> {
        Err(NavigationError::UnknownRoute {
            route: name.to_string(),
        })
    }

    fn url(&self, path: &str, params: &[String], _secure: bool) -> Result<String> {
        let path = append_segments(path, params);
        if has_scheme(&path) || path.starts_with('/') {
            Ok(path)
        } else {
            Ok(format!("/{path}"))
        }
    }
}

/// Fill a route pattern's placeholders from `params` in order.
pub fn fill_pattern(target: &str, pattern: &str, params: &[String]) -> Result<String> {
    let mut remaining = params.iter();
    let mut segments = Vec::new();

    for segment in pattern.split('/') {
        let Some((name, optional)) = placeholder(segment) else {
            segments.push(segment.to_string());
            continue;
        };

        match remaining.next() {
            Some(value) => segments.push(urlencoding::encode(value).into_owned()),
            None if optional => {}
            None => return Err(NavigationError::missing_parameter(target, name)),
        }
    }

    let mut path = segments.join("/");
    let query: Vec<String> = remaining
        .map(|p| urlencoding::encode(p).into_owned())
        .collect();
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query.join("&"));
    }

    Ok(path)
}

/// Prefix `http://` onto external URLs that carry no scheme.
pub fn external_url(url: &str) -> String {
    if has_scheme(url) || url.starts_with("//") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Request-style URL string: no trailing slash unless a query or fragment follows.
pub fn normalize_url(url: &Url) -> String {
    let s = url.as_str();
    if url.query().is_none() && url.fragment().is_none() {
        s.trim_end_matches('/').to_string()
    } else {
        s.to_string()
    }
}

/// Normalize a caller-supplied URL string the same way generated URLs are.
pub fn normalize_url_str(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => normalize_url(&parsed),
        Err(_) => url.to_string(),
    }
}

fn placeholder(segment: &str) -> Option<(&str, bool)> {
    if let Some(name) = segment.strip_prefix(':') {
        return Some((name.trim_end_matches('?'), name.ends_with('?')));
    }
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    Some((inner.trim_end_matches('?'), inner.ends_with('?')))
}

fn append_segments(path: &str, params: &[String]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let mut out = path.trim_end_matches('/').to_string();
    for param in params {
        out.push('/');
        out.push_str(&urlencoding::encode(param));
    }
    out
}

fn has_scheme(url: &str) -> bool {
    url.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new("http://example.com")
            .unwrap()
            .with_route("home", "/")
            .with_route("profile::edit-profile", "/profile/edit")
            .with_route("blog.post", "/blog/:slug")
            .with_route("search", "/search/{term?}")
            .with_action("UserController@show", "/users/{id}")
    }

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn route_without_params() {
        let url = table().route("profile::edit-profile", &[]).unwrap();
        assert_eq!(url, "http://example.com/profile/edit");
    }

    #[test]
    fn root_route_has_no_trailing_slash() {
        assert_eq!(table().route("home", &[]).unwrap(), "http://example.com");
    }

    #[test]
    fn route_fills_placeholders_in_order() {
        let url = table().route("blog.post", &params(&["hello world"])).unwrap();
        assert_eq!(url, "http://example.com/blog/hello%20world");
    }

    #[test]
    fn surplus_params_become_query() {
        let url = table()
            .route("blog.post", &params(&["intro", "draft"]))
            .unwrap();
        assert_eq!(url, "http://example.com/blog/intro?draft");
    }

    #[test]
    fn optional_placeholder_can_be_omitted() {
        assert_eq!(
            table().route("search", &[]).unwrap(),
            "http://example.com/search"
        );
        assert_eq!(
            table().route("search", &params(&["rust"])).unwrap(),
            "http://example.com/search/rust"
        );
    }

    #[test]
    fn missing_required_param_is_an_error() {
        let err = table().route("blog.post", &[]).unwrap_err();
        assert_eq!(err, NavigationError::missing_parameter("blog.post", "slug"));
    }

    #[test]
    fn unknown_route_and_action() {
        assert!(matches!(
            table().route("nope", &[]),
            Err(NavigationError::UnknownRoute { .. })
        ));
        assert!(matches!(
            table().action("Nope@index", &[]),
            Err(NavigationError::UnknownAction { .. })
        ));
    }

    #[test]
    fn action_resolves_through_pattern() {
        let url = table()
            .action("UserController@show", &params(&["7"]))
            .unwrap();
        assert_eq!(url, "http://example.com/users/7");
    }

    #[test]
    fn url_appends_params_as_segments() {
        let url = table().url("/docs", &params(&["a b", "c"]), false).unwrap();
        assert_eq!(url, "http://example.com/docs/a%20b/c");
    }

    #[test]
    fn secure_url_switches_scheme() {
        let url = table().url("account", &[], true).unwrap();
        assert_eq!(url, "https://example.com/account");
    }

    #[test]
    fn base_path_is_kept() {
        let table = RouteTable::new("http://example.com/app").unwrap();
        assert_eq!(
            table.url("/settings", &[], false).unwrap(),
            "http://example.com/app/settings"
        );
    }

    #[test]
    fn no_ssl_controls_preference() {
        assert!(!table().prefers_secure());
        assert!(table().with_no_ssl(false).prefers_secure());
    }

    #[test]
    fn invalid_base_url() {
        assert!(matches!(
            RouteTable::new("not a url"),
            Err(NavigationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn external_url_prefix() {
        assert_eq!(external_url("example.org"), "http://example.org");
        assert_eq!(external_url("https://example.org"), "https://example.org");
        assert_eq!(external_url("//cdn.example.org"), "//cdn.example.org");
    }

    #[test]
    fn relative_urls_pass_through() {
        let resolver = RelativeUrls;
        assert_eq!(resolver.url("about", &[], false).unwrap(), "/about");
        assert_eq!(
            resolver.url("/docs", &params(&["v2"]), true).unwrap(),
            "/docs/v2"
        );
        assert!(resolver.route("home", &[]).is_err());
    }

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(
            normalize_url_str("http://example.com/profile/"),
            "http://example.com/profile"
        );
        assert_eq!(
            normalize_url_str("http://example.com/?q=1"),
            "http://example.com/?q=1"
        );
    }
}
