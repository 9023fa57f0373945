//! Ancestor-first segment chains and the fold that nests wrappers around the
//! leaf content.

use super::{DeferredParam, LayoutWrapper, Node, ParamError, ParamView};
use std::{collections::BTreeMap, fmt, sync::Arc};
use tracing::{debug, instrument};

/// One level of the active route path.
pub struct RouteSegment {
    template: String,
    param: Option<(String, DeferredParam)>,
    wrappers: Vec<Arc<dyn LayoutWrapper>>,
}

impl RouteSegment {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            param: None,
            wrappers: Vec::new(),
        }
    }

    /// Declare the dynamic parameter captured at this depth.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: DeferredParam) -> Self {
        self.param = Some((name.into(), value));
        self
    }

    /// Add a wrapper; earlier wrappers at the same depth end up outside later ones.
    #[must_use]
    pub fn with_wrapper(mut self, wrapper: Arc<dyn LayoutWrapper>) -> Self {
        self.wrappers.push(wrapper);
        self
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl fmt::Debug for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSegment")
            .field("template", &self.template)
            .field("param", &self.param.as_ref().map(|(name, _)| name))
            .field(
                "wrappers",
                &self.wrappers.iter().map(|w| w.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Route segments from the route root down to the active leaf.
#[derive(Debug, Default)]
pub struct SegmentChain {
    segments: Vec<RouteSegment>,
}

impl SegmentChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn push(mut self, segment: RouteSegment) -> Self {
        self.segments.push(segment);
        self
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn templates(&self) -> Vec<&str> {
        self.segments.iter().map(RouteSegment::template).collect()
    }

    /// Await every deferred parameter in order of increasing depth.
    ///
    /// Each level receives a snapshot holding its own parameter and its
    /// ancestors' parameters only.
    /// # Errors
    /// Returns an error if a parameter fails to resolve or a name is declared
    /// twice along the chain.
    #[instrument(skip_all, fields(depth = self.segments.len()))]
    pub async fn resolve(self) -> Result<ResolvedChain, ParamError> {
        let mut scope = BTreeMap::new();
        let mut levels = Vec::with_capacity(self.segments.len());

        for segment in self.segments {
            if let Some((name, deferred)) = segment.param {
                if scope.contains_key(&name) {
                    return Err(ParamError::Duplicate(name));
                }
                let value = deferred.resolve().await?;
                debug!(param = %name, template = %segment.template, "parameter resolved");
                scope.insert(name, value);
            }
            levels.push(ResolvedLevel {
                template: segment.template,
                wrappers: segment.wrappers,
                params: ParamView::from(scope.clone()),
            });
        }

        Ok(ResolvedChain { levels })
    }
}

struct ResolvedLevel {
    template: String,
    wrappers: Vec<Arc<dyn LayoutWrapper>>,
    params: ParamView,
}

/// A chain whose parameters are all resolved, ready to wrap leaf content.
pub struct ResolvedChain {
    levels: Vec<ResolvedLevel>,
}

impl ResolvedChain {
    /// Parameters visible at `depth` (0 is the route root).
    #[must_use]
    pub fn params_at(&self, depth: usize) -> Option<&ParamView> {
        self.levels.get(depth).map(|level| &level.params)
    }

    /// Everything captured along the chain, as seen by the leaf.
    #[must_use]
    pub fn leaf_params(&self) -> ParamView {
        self.levels
            .last()
            .map(|level| level.params.clone())
            .unwrap_or_default()
    }

    /// Nest the wrappers around `leaf`, outermost ancestor outermost.
    #[must_use]
    pub fn compose(&self, leaf: Node) -> Node {
        self.levels.iter().rev().fold(leaf, |inner, level| {
            level.wrappers.iter().rev().fold(inner, |content, wrapper| {
                debug!(layout = wrapper.name(), template = %level.template, "wrapping");
                wrapper.wrap(&level.params, content)
            })
        })
    }
}

/// Resolve the chain and wrap `leaf` in one step.
/// # Errors
/// Returns an error if any parameter fails to resolve.
pub async fn compose(chain: SegmentChain, leaf: Node) -> Result<Node, ParamError> {
    Ok(chain.resolve().await?.compose(leaf))
}
