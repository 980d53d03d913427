//! HTML tag serialization.

use crate::attributes::Attributes;

/// Turns a tag name, inner content and attributes into markup.
pub trait TagSerializer {
    fn element(&self, tag: &str, content: &str, attributes: &Attributes) -> String;
}

/// Default serializer: attributes in name order, values escaped, empty
/// values omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

/// Elements written without a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

impl TagSerializer for HtmlSerializer {
    fn element(&self, tag: &str, content: &str, attributes: &Attributes) -> String {
        let attrs = render_attributes(attributes);

        if VOID_ELEMENTS.contains(&tag) {
            return format!("<{tag}{attrs} />");
        }

        format!("<{tag}{attrs}>{content}</{tag}>")
    }
}

/// Render attributes as ` name="value"` pairs.
pub fn render_attributes(attributes: &Attributes) -> String {
    attributes
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!(" {name}=\"{}\"", html_escape(value)))
        .collect()
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
