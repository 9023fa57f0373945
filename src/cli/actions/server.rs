use crate::{cli::globals::GlobalArgs, gatehouse, session::IdentityProviderResolver};
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};
use tracing::info;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub site_url: Url,
    pub idp_url: Url,
    pub session_cookie: String,
    pub session_timeout: Duration,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the configuration is inconsistent or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let globals = GlobalArgs::new(args.site_url, args.idp_url)
        .context("Could not derive the identity provider login URL")?
        .with_session_cookie(args.session_cookie)
        .with_session_timeout(args.session_timeout);

    let resolver = IdentityProviderResolver::new(
        &globals.idp_url,
        &globals.session_cookie,
        globals.session_timeout,
    )
    .context("Could not build the session resolver")?;

    info!("Resolving sessions via {}", resolver.session_url());

    gatehouse::new(args.port, globals, Arc::new(resolver)).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("site_url", args.site_url.to_string()),
        ("idp_url", args.idp_url.to_string()),
        ("session_cookie", args.session_cookie.clone()),
        (
            "session_timeout",
            format!("{}s", args.session_timeout.as_secs()),
        ),
    ];
    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let body = entries
        .iter()
        .map(|(key, value)| format!("  {key:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    info!("Startup configuration\n{body}");
}
