use crate::layout::Node;

/// Inner 404 content; callers decide whether it sits inside the shell.
#[must_use]
pub fn not_found() -> Node {
    Node::element("div")
        .attr("class", "not-found")
        .child(Node::element("h1").child(Node::text("404")))
        .child(Node::element("p").child(Node::text("Page not found")))
        .child(
            Node::element("a")
                .attr("href", "/")
                .attr("class", "button")
                .child(Node::text("Go Home")),
        )
}
