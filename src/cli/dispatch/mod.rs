use crate::cli::{
    actions::{server::Args, Action},
    commands::{ARG_IDP_URL, ARG_PORT, ARG_SESSION_COOKIE, ARG_SESSION_TIMEOUT, ARG_SITE_URL},
    globals::{DEFAULT_SESSION_COOKIE, DEFAULT_SESSION_TIMEOUT, DEFAULT_SITE_URL},
};
use anyhow::{anyhow, Context, Result};
use std::time::Duration;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or not valid URLs.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let site_url = matches
        .get_one::<String>(ARG_SITE_URL)
        .map_or(DEFAULT_SITE_URL, String::as_str);
    let site_url = parse_http_url(site_url).context("invalid GATEHOUSE_SITE_URL")?;

    let idp_url = matches
        .get_one::<String>(ARG_IDP_URL)
        .context("missing required argument: --idp-url")?;
    let idp_url = parse_http_url(idp_url).context("invalid GATEHOUSE_IDP_URL")?;

    let session_cookie = matches
        .get_one::<String>(ARG_SESSION_COOKIE)
        .cloned()
        .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());

    let session_timeout = matches
        .get_one::<u64>(ARG_SESSION_TIMEOUT)
        .copied()
        .map_or(DEFAULT_SESSION_TIMEOUT, Duration::from_secs);

    Ok(Action::Server(Args {
        port,
        site_url,
        idp_url,
        session_cookie,
        session_timeout,
    }))
}

fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if matches!(url.scheme(), "http" | "https") && url.has_host() {
        Ok(url)
    } else {
        Err(anyhow!("unsupported URL {raw}, expected http(s)://host"))
    }
}
