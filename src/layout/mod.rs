//! Layout composition for nested routes.
//!
//! Nesting is an explicit ancestor-first [`SegmentChain`]. Parameters are
//! resolved in depth order, then wrappers are folded around the leaf so the
//! root's wrapper is the outermost structure. A wrapper at depth `d` only ever
//! receives the [`ParamView`] snapshot taken at `d`.

mod chain;
mod markup;
mod params;

pub use chain::{compose, ResolvedChain, RouteSegment, SegmentChain};
pub use markup::{Element, Node, LAYOUT_ATTR};
pub use params::{DeferredParam, ParamError, ParamView};

/// Structural chrome applied around nested content at one route depth.
pub trait LayoutWrapper: Send + Sync {
    /// Stable name, rendered as the wrapper's `data-layout` attribute.
    fn name(&self) -> &'static str;

    fn wrap(&self, params: &ParamView, children: Node) -> Node;
}
