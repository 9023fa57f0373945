//! Route parameters: deferred values per segment and the read-only view a
//! wrapper receives once its depth has been resolved.

use futures::future::{BoxFuture, FutureExt};
use std::{collections::BTreeMap, fmt, future::Future, sync::Arc};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("parameter `{0}` is declared more than once in the route chain")]
    Duplicate(String),
    #[error("parameter `{name}` could not be resolved: {reason}")]
    Unresolved { name: String, reason: String },
}

/// A parameter value that becomes available only after it is awaited.
pub struct DeferredParam(BoxFuture<'static, Result<String, ParamError>>);

impl DeferredParam {
    /// Wrap a value that is already known.
    #[must_use]
    pub fn ready(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(async move { Ok(value) }.boxed())
    }

    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Result<String, ParamError>> + Send + 'static,
    {
        Self(future.boxed())
    }

    pub(crate) async fn resolve(self) -> Result<String, ParamError> {
        self.0.await
    }
}

impl fmt::Debug for DeferredParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredParam(..)")
    }
}

/// Parameters resolved at or above one depth of the chain.
///
/// Cheap to clone; each depth holds its own snapshot so later captures never
/// leak upward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamView(Arc<BTreeMap<String, String>>);

impl ParamView {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for ParamView {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(Arc::new(map))
    }
}
