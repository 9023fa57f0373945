//! Full HTML document around a rendered body.

use crate::layout::Node;
use url::Url;

/// Wrap `body` in a complete document.
///
/// `canonical_path` is joined onto the site base URL; an unjoinable path
/// leaves the canonical link out rather than failing the page.
#[must_use]
pub fn document(site_url: &Url, title: &str, canonical_path: &str, body: Node) -> String {
    let mut head = Node::element("head")
        .child(Node::element("meta").attr("charset", "utf-8"))
        .child(
            Node::element("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Node::element("title").child(Node::text(format!("{title} · Gatehouse"))));

    if let Ok(canonical) = site_url.join(canonical_path) {
        head = head.child(
            Node::element("link")
                .attr("rel", "canonical")
                .attr("href", canonical.as_str()),
        );
    }

    let html = Node::element("html")
        .attr("lang", "en")
        .child(head)
        .child(Node::element("body").child(body));

    format!("<!DOCTYPE html>{html}")
}
