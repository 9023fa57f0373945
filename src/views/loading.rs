use crate::{components::spinner, layout::Node};

/// Centered spinner shown while a session is still settling.
#[must_use]
pub fn loading() -> Node {
    Node::element("div")
        .attr("class", "loading")
        .child(spinner())
        .child(
            Node::element("p")
                .attr("class", "loading-label")
                .child(Node::text("Loading...")),
        )
}
