//! Signpost navigation builder.
//!
//! Build trees of menu items, link them to routes, actions or URLs, track
//! which items are active for the current request and render the trees as
//! HTML lists.
//!
//! ```
//! use signpost::{Menu, RenderContext};
//!
//! let mut menu = Menu::new("main");
//! menu.add("Home").url("/", &[]);
//! let mut about = menu.add("About");
//! about.url("/about", &[]);
//! about.add("Team").url("/about/team", &[]);
//!
//! let ctx = RenderContext::default().with_current_url("/about/team");
//! let html = menu.render(&ctx);
//! assert!(html.contains("nav-second-level"));
//! assert!(html.contains(r#"<li class="active">"#));
//! ```

pub mod attributes;
pub mod context;
pub mod definition;
pub mod dropdown;
pub mod error;
pub mod html;
pub mod item;
pub mod link;
pub mod menu;
pub mod navigation;
pub mod options;
pub mod ordinal;
pub mod resolver;

pub use attributes::{AttributeKind, Attributes};
pub use context::{Authorizer, PermissionSet, RenderContext, ViewShare};
pub use definition::{ItemDefinition, MenuDefinition, NavigationDefinition};
pub use dropdown::{Dropdown, DropdownConfig};
pub use error::{NavigationError, Result};
pub use html::{HtmlSerializer, TagSerializer};
pub use item::{Item, ItemId};
pub use link::Link;
pub use menu::{ItemMut, Menu};
pub use navigation::Navigation;
pub use options::{ItemCallback, OptionValue, Options};
pub use resolver::{RelativeUrls, RouteTable, UrlResolver};
