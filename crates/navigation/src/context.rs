//! Per-render collaborators.
//!
//! A [`RenderContext`] carries everything rendering reads from the outside
//! world: the URL resolver, the current request URL, the authorization
//! check, the tag serializer and the navigation registry used for
//! cross-menu lookups. Nothing is read from globals.

use std::collections::BTreeSet;
use std::fmt;

use crate::html::{HtmlSerializer, TagSerializer};
use crate::menu::Menu;
use crate::navigation::Navigation;
use crate::resolver::{RelativeUrls, UrlResolver, normalize_url_str};

/// Decides whether the current user may see an item.
pub trait Authorizer {
    fn allows(&self, ability: &str, subject: Option<&str>) -> bool;
}

/// Receives menus as they are registered so the view layer can use them.
pub trait ViewShare {
    fn share(&mut self, name: &str, menu: &Menu);
}

impl<F> ViewShare for F
where
    F: FnMut(&str, &Menu),
{
    fn share(&mut self, name: &str, menu: &Menu) {
        self(name, menu);
    }
}

/// Abilities granted to the current user.
///
/// An ability matches either on its own (`edit posts`) or scoped to a
/// subject (`edit posts:42`). Admins are allowed everything.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    permissions: BTreeSet<String>,
    admin: bool,
}

impl PermissionSet {
    /// Create a set for an anonymous user with no abilities.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create a set from granted abilities.
    pub fn new<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            admin: false,
        }
    }

    /// Create a set that allows every ability.
    pub fn admin() -> Self {
        Self {
            permissions: BTreeSet::new(),
            admin: true,
        }
    }

    pub fn grant(&mut self, permission: impl Into<String>) -> &mut Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.admin || self.permissions.contains(permission)
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

impl Authorizer for PermissionSet {
    fn allows(&self, ability: &str, subject: Option<&str>) -> bool {
        if self.has_permission(ability) {
            return true;
        }
        subject.is_some_and(|s| self.has_permission(&format!("{ability}:{s}")))
    }
}

/// Collaborators for one render.
#[derive(Clone)]
pub struct RenderContext<'a> {
    resolver: &'a dyn UrlResolver,
    serializer: &'a dyn TagSerializer,
    authorizer: Option<&'a dyn Authorizer>,
    navigation: Option<&'a Navigation>,
    current_url: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(resolver: &'a dyn UrlResolver) -> Self {
        Self {
            resolver,
            serializer: &HtmlSerializer,
            authorizer: None,
            navigation: None,
            current_url: None,
        }
    }

    /// Set the URL of the in-flight request; used for activation.
    pub fn with_current_url(mut self, url: &str) -> Self {
        self.current_url = Some(normalize_url_str(url));
        self
    }

    pub fn with_authorizer(mut self, authorizer: &'a dyn Authorizer) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn with_navigation(mut self, navigation: &'a Navigation) -> Self {
        self.navigation = Some(navigation);
        self
    }

    pub fn with_serializer(mut self, serializer: &'a dyn TagSerializer) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn resolver(&self) -> &'a dyn UrlResolver {
        self.resolver
    }

    pub fn serializer(&self) -> &'a dyn TagSerializer {
        self.serializer
    }

    pub fn authorizer(&self) -> Option<&'a dyn Authorizer> {
        self.authorizer
    }

    pub fn navigation(&self) -> Option<&'a Navigation> {
        self.navigation
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Whether `url` is the current request URL, both normalized alike.
    pub fn is_current(&self, url: &str) -> bool {
        self.current_url
            .as_deref()
            .is_some_and(|current| current == normalize_url_str(url))
    }
}

impl Default for RenderContext<'static> {
    fn default() -> Self {
        RenderContext::new(&RelativeUrls)
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("current_url", &self.current_url)
            .field("authorizer", &self.authorizer.is_some())
            .field("navigation", &self.navigation.is_some())
            .finish_non_exhaustive()
    }
}
