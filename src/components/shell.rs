//! Side navigation shell for authenticated routes.
//!
//! The shell is fixed chrome: it does not read the session or any route
//! parameter, so wrapping the same children twice yields the same tree.

use crate::layout::{LayoutWrapper, Node, ParamView, LAYOUT_ATTR};

const SIDEBAR_ID: &str = "app-sidebar";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug)]
pub struct NavigationShell {
    brand: &'static str,
    links: Vec<NavLink>,
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new(
            "Gatehouse",
            vec![
                NavLink {
                    href: "/",
                    icon: "dashboard",
                    label: "Dashboard",
                },
                NavLink {
                    href: "/profile",
                    icon: "person",
                    label: "My Profile",
                },
            ],
        )
    }
}

impl NavigationShell {
    #[must_use]
    pub fn new(brand: &'static str, links: Vec<NavLink>) -> Self {
        Self { brand, links }
    }

    /// Sidebar and trigger around `children`.
    #[must_use]
    pub fn render(&self, children: Node) -> Node {
        Node::element("div")
            .attr(LAYOUT_ATTR, self.name())
            .attr("class", "shell")
            .child(self.sidebar())
            .child(trigger())
            .child(Node::element("main").attr("class", "shell-content").child(children))
    }

    fn sidebar(&self) -> Node {
        let items = self.links.iter().map(|link| {
            Node::element("li").child(
                Node::element("a")
                    .attr("href", link.href)
                    .attr("class", "sidebar-link")
                    .child(
                        Node::element("span")
                            .attr("class", "material-symbols-outlined")
                            .child(Node::text(link.icon)),
                    )
                    .child(Node::text(link.label)),
            )
        });

        Node::element("aside")
            .attr("id", SIDEBAR_ID)
            .attr("class", "sidebar")
            .child(
                Node::element("div")
                    .attr("class", "sidebar-brand")
                    .child(Node::text(self.brand)),
            )
            .child(Node::element("nav").child(Node::element("ul").children(items)))
    }
}

fn trigger() -> Node {
    Node::element("button")
        .attr("type", "button")
        .attr("class", "sidebar-trigger")
        .attr("aria-controls", SIDEBAR_ID)
        .attr("aria-expanded", "false")
        .child(
            Node::element("span")
                .attr("class", "sr-only")
                .child(Node::text("Toggle sidebar")),
        )
}

impl LayoutWrapper for NavigationShell {
    fn name(&self) -> &'static str {
        "navigation-shell"
    }

    fn wrap(&self, _params: &ParamView, children: Node) -> Node {
        self.render(children)
    }
}
