//! Profile routes: `/profile` for the signed-in user and
//! `/profile/{username}` wrapped in the profile layout.

use super::Page;
use crate::{
    layout::{LayoutWrapper, Node, ParamView, LAYOUT_ATTR},
    session::Session,
};
use serde_json::Value;

pub(super) const USERNAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$";
const USERNAME: &str = "username";

/// Header chrome for a single user's profile.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileLayout;

impl LayoutWrapper for ProfileLayout {
    fn name(&self) -> &'static str {
        "profile"
    }

    fn wrap(&self, params: &ParamView, children: Node) -> Node {
        let mut section = Node::element("section").attr(LAYOUT_ATTR, self.name());
        if let Some(username) = params.get(USERNAME) {
            section = section
                .attr("data-username", username)
                .child(Node::element("header").child(
                    Node::element("h1").child(Node::text(format!("@{username}"))),
                ));
        }
        section.child(children)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProfilePage;

impl Page for ProfilePage {
    fn title(&self, params: &ParamView) -> String {
        params
            .get(USERNAME)
            .map_or_else(|| "My Profile".to_string(), |username| format!("@{username}"))
    }

    fn render(&self, session: &Session, params: &ParamView) -> Node {
        let own = match params.get(USERNAME) {
            None => true,
            Some(username) => session.username() == Some(username),
        };

        let mut details = Node::element("dl")
            .attr("class", "profile-details")
            .children(detail("User ID", &session.user_id))
            .children(detail("Email", &session.email));

        if own {
            // Best effort: only what the provider actually sent is shown.
            for (key, value) in &session.metadata {
                if let Some(text) = metadata_text(value) {
                    details = details.children(detail(key, &text));
                }
            }
        }

        let heading = match params.get(USERNAME) {
            Some(username) if !own => format!("Viewing @{username}"),
            _ => session.display_label().to_string(),
        };

        Node::element("article")
            .attr("class", "profile")
            .attr("data-own", own.to_string())
            .child(Node::element("h2").child(Node::text(heading)))
            .child(details)
    }
}

fn detail(label: &str, value: &str) -> [Node; 2] {
    [
        Node::element("dt").child(Node::text(label)),
        Node::element("dd").child(Node::text(value)),
    ]
}

fn metadata_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
