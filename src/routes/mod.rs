//! Route table for the guarded subtree.
//!
//! Nesting lives here as data: each [`RouteNode`] owns its pattern, wrappers,
//! optional page and children. Resolving a path yields the ancestor-first
//! [`SegmentChain`] the compositor folds, with dynamic captures deferred.

mod dashboard;
mod profile;

pub use dashboard::DashboardPage;
pub use profile::{ProfileLayout, ProfilePage};

use crate::{
    components::NavigationShell,
    layout::{DeferredParam, LayoutWrapper, Node, ParamView, RouteSegment, SegmentChain},
    session::Session,
};
use regex::Regex;
use std::{fmt, sync::Arc};
use tracing::warn;

/// Leaf content for a matched route.
pub trait Page: Send + Sync {
    fn title(&self, params: &ParamView) -> String;

    fn render(&self, session: &Session, params: &ParamView) -> Node;
}

pub enum SegmentPattern {
    /// The route root; consumes no path segment.
    Root,
    Static(String),
    /// `{name}` capture, optionally constrained.
    Param { name: String, constraint: Option<Regex> },
}

impl SegmentPattern {
    /// Parse `""`/`"/"`, `"profile"` or `"{username}"`.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let trimmed = pattern.trim_matches('/');
        if trimmed.is_empty() {
            return Self::Root;
        }
        match trimmed.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
            Some(name) => Self::Param {
                name: name.to_string(),
                constraint: None,
            },
            None => Self::Static(trimmed.to_string()),
        }
    }

    fn matches(&self, segment: &str) -> bool {
        match self {
            Self::Root => false,
            Self::Static(literal) => literal == segment,
            Self::Param { constraint, .. } => constraint
                .as_ref()
                .map_or(true, |regex| regex.is_match(segment)),
        }
    }
}

impl fmt::Display for SegmentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Static(literal) => f.write_str(literal),
            Self::Param { name, .. } => write!(f, "{{{name}}}"),
        }
    }
}

pub struct RouteNode {
    pattern: SegmentPattern,
    wrappers: Vec<Arc<dyn LayoutWrapper>>,
    page: Option<Arc<dyn Page>>,
    children: Vec<RouteNode>,
}

impl RouteNode {
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: SegmentPattern::parse(pattern),
            wrappers: Vec::new(),
            page: None,
            children: Vec::new(),
        }
    }

    /// Restrict a `{name}` capture to values matching `constraint`.
    #[must_use]
    pub fn constrained(mut self, constraint: Regex) -> Self {
        if let SegmentPattern::Param { constraint: slot, .. } = &mut self.pattern {
            *slot = Some(constraint);
        }
        self
    }

    #[must_use]
    pub fn wrapper(mut self, wrapper: Arc<dyn LayoutWrapper>) -> Self {
        self.wrappers.push(wrapper);
        self
    }

    #[must_use]
    pub fn page(mut self, page: Arc<dyn Page>) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    fn segment(&self, captured: Option<&str>) -> RouteSegment {
        let mut segment = RouteSegment::new(self.pattern.to_string());
        if let (SegmentPattern::Param { name, .. }, Some(value)) = (&self.pattern, captured) {
            segment = segment.with_param(name.clone(), DeferredParam::ready(value));
        }
        self.wrappers
            .iter()
            .cloned()
            .fold(segment, RouteSegment::with_wrapper)
    }
}

/// A resolved request path: the chain to compose and the page at its end.
pub struct MatchedRoute {
    pub chain: SegmentChain,
    pub page: Arc<dyn Page>,
}

pub struct RouteTree {
    root: RouteNode,
}

impl RouteTree {
    #[must_use]
    pub fn new(root: RouteNode) -> Self {
        Self { root }
    }

    /// Match `path` against the tree. Static children win over captures; a
    /// path ending on a node without a page does not match.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<MatchedRoute> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut trail: Vec<(&RouteNode, Option<&str>)> = vec![(&self.root, None)];
        if !descend(&self.root, &segments, &mut trail) {
            return None;
        }

        let (leaf, _) = trail.last()?;
        let page = leaf.page.clone()?;
        let chain = trail
            .iter()
            .fold(SegmentChain::new(), |chain, (node, captured)| {
                chain.push(node.segment(*captured))
            });

        Some(MatchedRoute { chain, page })
    }
}

fn descend<'a>(
    node: &'a RouteNode,
    remaining: &[&'a str],
    trail: &mut Vec<(&'a RouteNode, Option<&'a str>)>,
) -> bool {
    let Some((head, rest)) = remaining.split_first() else {
        return node.page.is_some();
    };

    let statics = node
        .children
        .iter()
        .filter(|child| matches!(child.pattern, SegmentPattern::Static(_)));
    let params = node
        .children
        .iter()
        .filter(|child| matches!(child.pattern, SegmentPattern::Param { .. }));

    for child in statics.chain(params) {
        if !child.pattern.matches(head) {
            continue;
        }
        let captured = matches!(child.pattern, SegmentPattern::Param { .. }).then_some(*head);
        trail.push((child, captured));
        if descend(child, rest, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// The application's guarded routes.
///
/// ```text
/// /                       NavigationShell   DashboardPage
/// └── profile                               ProfilePage
///     └── {username}      ProfileLayout     ProfilePage
/// ```
#[must_use]
pub fn app_routes() -> RouteTree {
    let profile_page: Arc<dyn Page> = Arc::new(ProfilePage);

    let mut username = RouteNode::new("{username}")
        .wrapper(Arc::new(ProfileLayout))
        .page(profile_page.clone());
    match Regex::new(profile::USERNAME_PATTERN) {
        Ok(constraint) => username = username.constrained(constraint),
        Err(err) => warn!("username constraint disabled: {err}"),
    }

    RouteTree::new(
        RouteNode::new("/")
            .wrapper(Arc::new(NavigationShell::default()))
            .page(Arc::new(DashboardPage))
            .child(RouteNode::new("profile").page(profile_page).child(username)),
    )
}
