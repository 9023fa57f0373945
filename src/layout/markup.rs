//! Minimal markup tree rendered to HTML.

use std::fmt::{self, Write};

/// Attribute marking the structural layer a layout wrapper contributed.
pub const LAYOUT_ATTR: &str = "data-layout";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl Node {
    #[must_use]
    pub fn element(tag: &'static str) -> Self {
        Self::Element(Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Add an attribute; no-op on text.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element(element) = &mut self {
            element.attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Append a child; text is left untouched.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        if let Self::Element(element) = &mut self {
            element.children.push(child);
        }
        self
    }

    #[must_use]
    pub fn children(self, children: impl IntoIterator<Item = Node>) -> Self {
        children.into_iter().fold(self, Self::child)
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element(element) => element
                .attrs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// Layout names from the outermost wrapper inward, following the first
    /// nested wrapper at each level.
    #[must_use]
    pub fn layout_path(&self) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(name) = node.get_attr(LAYOUT_ATTR) {
                path.push(name.to_string());
            }
            current = node.child_nodes().iter().find_map(find_layout);
        }
        path
    }

    /// Concatenated text content, useful for assertions.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    fn child_nodes(&self) -> &[Node] {
        match self {
            Self::Element(element) => &element.children,
            Self::Text(_) => &[],
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn find_layout(node: &Node) -> Option<&Node> {
    if node.get_attr(LAYOUT_ATTR).is_some() {
        return Some(node);
    }
    node.child_nodes().iter().find_map(find_layout)
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(Element { children, .. }) => {
            for child in children {
                collect_text(child, out);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write_escaped(f, text),
            Self::Element(element) => {
                write!(f, "<{}", element.tag)?;
                for (name, value) in &element.attrs {
                    write!(f, " {name}=\"")?;
                    write_escaped(f, value)?;
                    f.write_char('"')?;
                }
                f.write_char('>')?;
                if VOID_TAGS.contains(&element.tag) {
                    return Ok(());
                }
                for child in &element.children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{}>", element.tag)
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            '\'' => f.write_str("&#39;")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}
