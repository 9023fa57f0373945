use crate::layout::Node;
use url::Url;

/// Sign-in entry point. Credentials are entered at the identity provider.
#[must_use]
pub fn login(provider_login_url: &Url) -> Node {
    Node::element("div")
        .attr("class", "login")
        .child(Node::element("h1").child(Node::text("Sign in")))
        .child(Node::element("p").child(Node::text(
            "You need to sign in to continue.",
        )))
        .child(
            Node::element("a")
                .attr("href", provider_login_url.as_str())
                .attr("class", "button")
                .child(Node::text("Continue to sign in")),
        )
}
