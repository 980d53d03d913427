//! Navigation error types.
//!
//! Single-property lookups return `Option`; only composite lookups, URL
//! resolution and definition loading produce these errors.

use thiserror::Error;

/// Errors raised by the navigation builder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No menu is registered under this name.
    #[error("menu '{menu}' not found")]
    MenuNotFound { menu: String },

    /// The menu exists but holds no item with this nickname.
    #[error("menu '{menu}': item '{item}' not found")]
    ItemNotFound { menu: String, item: String },

    /// A composite lookup path is not of the form `menu.item`.
    #[error("invalid item path '{path}', expected 'menu.item'")]
    InvalidItemPath { path: String },

    /// No route is registered under this name.
    #[error("route '{route}' is not defined")]
    UnknownRoute { route: String },

    /// No action is registered under this name.
    #[error("action '{action}' is not defined")]
    UnknownAction { action: String },

    /// A route or action pattern placeholder had no matching parameter.
    #[error("'{target}' requires parameter '{parameter}'")]
    MissingParameter { target: String, parameter: String },

    /// A URL could not be parsed or joined onto the base URL.
    #[error("invalid url '{url}': {details}")]
    InvalidUrl { url: String, details: String },

    /// A navigation definition could not be parsed.
    #[error("invalid navigation definition: {details}")]
    Definition { details: String },
}

impl NavigationError {
    /// Create a missing menu error.
    pub fn menu_not_found(menu: impl Into<String>) -> Self {
        Self::MenuNotFound { menu: menu.into() }
    }

    /// Create a missing item error.
    pub fn item_not_found(menu: impl Into<String>, item: impl Into<String>) -> Self {
        Self::ItemNotFound {
            menu: menu.into(),
            item: item.into(),
        }
    }

    /// Create a missing parameter error.
    pub fn missing_parameter(target: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            target: target.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, details: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            details: details.to_string(),
        }
    }

    /// Whether this error is one of the not-found lookups.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MenuNotFound { .. } | Self::ItemNotFound { .. })
    }
}

impl From<serde_json::Error> for NavigationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Definition {
            details: e.to_string(),
        }
    }
}

impl From<toml::de::Error> for NavigationError {
    fn from(e: toml::de::Error) -> Self {
        Self::Definition {
            details: e.to_string(),
        }
    }
}

/// Result type alias using NavigationError.
pub type Result<T> = std::result::Result<T, NavigationError>;
