use crate::layout::Node;

pub const AUTH_ERROR_TITLE: &str = "Authentication Error";

/// Fixed page for a verification failure reported by the identity provider.
///
/// It links back to the sign-in page but never redirects on its own.
#[must_use]
pub fn auth_error() -> Node {
    Node::element("div")
        .attr("class", "auth-error")
        .child(Node::element("h1").child(Node::text(AUTH_ERROR_TITLE)))
        .child(Node::element("p").child(Node::text(
            "We could not verify your sign-in. Please try again.",
        )))
        .child(
            Node::element("a")
                .attr("href", crate::guard::LOGIN_PATH)
                .attr("class", "button")
                .child(Node::text("Back to sign in")),
        )
}
