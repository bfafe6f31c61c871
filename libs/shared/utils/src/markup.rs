//! Minimal element tree used by the view renderers.
//!
//! Views describe structure only. The tree serializes to escaped HTML for
//! embedding in pages and to indented plain text for terminals.

use serde::Serialize;
use tera::{Context, Tera};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Depth-first search for the first element with `tag`.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(tag))
    }

    /// All text beneath this element, concatenated.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }

    /// Escaped HTML, rendered through [`HtmlRenderer`].
    pub fn to_html(&self) -> Result<String, tera::Error> {
        HtmlRenderer::new()?.render(self)
    }

    /// Render as plain text: block elements start a new line, list items
    /// get a bullet, buttons are bracketed, table cells are tab-separated.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        self.write_text(0, &mut lines);
        lines.join("\n")
    }

    fn write_text(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        match self.tag {
            "li" => lines.push(format!("{}- {}", indent, self.text_content())),
            "button" => lines.push(format!("{}[{}]", indent, self.text_content())),
            "tr" => {
                let cells: Vec<String> = self
                    .child_elements()
                    .map(Element::text_content)
                    .collect();
                lines.push(format!("{}{}", indent, cells.join("\t")));
            }
            "h1" | "h2" | "h3" | "p" | "span" | "a" | "td" | "th" | "label" => {
                lines.push(format!("{}{}", indent, self.text_content()));
            }
            _ => {
                let nested = if self.tag == "ul" { depth + 1 } else { depth };
                for node in &self.children {
                    match node {
                        Node::Text(t) if !t.trim().is_empty() => {
                            lines.push(format!("{}{}", indent, t));
                        }
                        Node::Text(_) => {}
                        Node::Element(e) => e.write_text(nested, lines),
                    }
                }
            }
        }
    }
}

const ELEMENT_TEMPLATE: &str = "element.html";

// Element children arrive pre-rendered and are marked safe; text children
// and attribute values go through autoescaping.
const ELEMENT_SOURCE: &str = concat!(
    "<{{ tag }}",
    "{% if classes %} class=\"{{ classes }}\"{% endif %}",
    "{% for attr in attrs %} {{ attr.name }}=\"{{ attr.value }}\"{% endfor %}>",
    "{% if not void %}",
    "{% for child in children %}",
    "{% if child.kind == \"html\" %}{{ child.value | safe }}{% else %}{{ child.value }}{% endif %}",
    "{% endfor %}",
    "</{{ tag }}>",
    "{% endif %}",
);

const VOID_TAGS: [&str; 4] = ["img", "input", "br", "hr"];

#[derive(Serialize)]
struct AttrView<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
struct ChildView {
    kind: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ElementView<'a> {
    tag: &'static str,
    classes: String,
    attrs: Vec<AttrView<'a>>,
    void: bool,
    children: Vec<ChildView>,
}

/// Tera instance holding the element template. Autoescaping is on because
/// the template name ends in `.html`.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(ELEMENT_TEMPLATE, ELEMENT_SOURCE)?;
        Ok(Self { tera })
    }

    pub fn render(&self, element: &Element) -> Result<String, tera::Error> {
        let children = element
            .children
            .iter()
            .map(|node| match node {
                Node::Element(child) => Ok(ChildView {
                    kind: "html",
                    value: self.render(child)?,
                }),
                Node::Text(text) => Ok(ChildView {
                    kind: "text",
                    value: text.clone(),
                }),
            })
            .collect::<Result<Vec<_>, tera::Error>>()?;

        let view = ElementView {
            tag: element.tag,
            classes: element.classes.join(" "),
            attrs: element
                .attrs
                .iter()
                .map(|(name, value)| AttrView { name, value })
                .collect(),
            void: VOID_TAGS.contains(&element.tag),
            children,
        };

        let context = Context::from_serialize(&view)?;
        self.tera.render(ELEMENT_TEMPLATE, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("div")
            .class("doctor-card")
            .attr("data-id", "4")
            .child(Element::new("h3").text("Dr. <Who>"))
            .child(
                Element::new("ul")
                    .child(Element::new("li").text("09:00-10:00"))
                    .child(Element::new("li").text("10:00-11:00")),
            )
            .child(Element::new("button").text("Delete"))
    }

    #[test]
    fn html_is_escaped() {
        let html = sample().to_html().unwrap();
        assert!(html.starts_with("<div class=\"doctor-card\" data-id=\"4\">"));
        assert!(html.contains("<h3>Dr. &lt;Who&gt;</h3>"));
        assert!(html.contains("<li>09:00-10:00</li><li>10:00-11:00</li>"));
        assert!(html.ends_with("<button>Delete</button></div>"));
    }

    #[test]
    fn attribute_values_are_escaped_and_void_tags_stay_open() {
        let renderer = HtmlRenderer::new().unwrap();
        let element = Element::new("p")
            .child(Element::new("input").attr("value", "\"><script>"))
            .text("a & b");

        let html = renderer.render(&element).unwrap();
        assert_eq!(html, "<p><input value=\"&quot;&gt;&lt;script&gt;\">a &amp; b</p>");
    }

    #[test]
    fn text_rendering_indents_lists_and_brackets_buttons() {
        let text = sample().to_text();
        assert_eq!(
            text,
            "Dr. <Who>\n  - 09:00-10:00\n  - 10:00-11:00\n[Delete]"
        );
    }

    #[test]
    fn find_and_text_content_walk_the_tree() {
        let card = sample();
        assert_eq!(card.find("button").map(Element::text_content), Some("Delete".to_string()));
        assert_eq!(card.attr_value("data-id"), Some("4"));
        assert!(card.has_class("doctor-card"));
        assert!(card.find("table").is_none());
    }
}
