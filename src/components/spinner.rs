use crate::layout::Node;

#[must_use]
pub fn spinner() -> Node {
    Node::element("div")
        .attr("class", "spinner")
        .attr("role", "status")
        .attr("aria-live", "polite")
        .attr("aria-label", "Loading")
}
