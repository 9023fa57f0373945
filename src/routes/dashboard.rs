use super::Page;
use crate::{
    layout::{Node, ParamView},
    session::Session,
};

#[derive(Clone, Copy, Debug, Default)]
pub struct DashboardPage;

impl Page for DashboardPage {
    fn title(&self, _params: &ParamView) -> String {
        "Dashboard".to_string()
    }

    fn render(&self, session: &Session, _params: &ParamView) -> Node {
        Node::element("div")
            .attr("class", "dashboard")
            .child(Node::element("h2").child(Node::text(format!(
                "Welcome, {}",
                session.display_label()
            ))))
            .child(
                Node::element("a")
                    .attr("href", "/profile")
                    .child(Node::text("View your profile")),
            )
    }
}
