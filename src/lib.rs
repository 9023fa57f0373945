//! # Gatehouse
//!
//! `gatehouse` is a small server-rendered front-end that gates nested page
//! routes behind a session verified by an external identity provider, and
//! composes a persistent navigation shell around the gated content.
//!
//! ## Request flow
//!
//! 1. The route guard asks the [`session::SessionResolver`] for the current
//!    session exactly once. No session (or a resolver failure) redirects to
//!    [`guard::LOGIN_PATH`] and nothing of the guarded subtree renders.
//! 2. The request path is matched against the [`routes::RouteTree`], producing
//!    an ancestor-first [`layout::SegmentChain`].
//! 3. Dynamic parameters are resolved in order of increasing depth, and every
//!    layout wrapper sees only the parameters declared at or above its depth.
//! 4. The leaf page renders with the session, and the wrappers are folded
//!    around it so the outermost ancestor (the navigation shell) is outermost.
//!
//! Credential verification and token issuance belong to the identity
//! provider; this crate only consumes its session endpoint.

pub mod cli;
pub mod components;
pub mod gatehouse;
pub mod guard;
pub mod layout;
pub mod routes;
pub mod session;
pub mod views;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
