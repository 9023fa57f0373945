pub mod logging;

use crate::cli::globals::DEFAULT_SITE_URL;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_SITE_URL: &str = "site-url";
pub const ARG_IDP_URL: &str = "idp-url";
pub const ARG_SESSION_COOKIE: &str = "session-cookie";
pub const ARG_SESSION_TIMEOUT: &str = "session-timeout";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("gatehouse")
        .about("Session-gated web front-end")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("GATEHOUSE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_SITE_URL)
                .long("site-url")
                .help("Public base URL of this site, used for canonical links and the login callback")
                .default_value(DEFAULT_SITE_URL)
                .env("GATEHOUSE_SITE_URL"),
        )
        .arg(
            Arg::new(ARG_IDP_URL)
                .long("idp-url")
                .help("Identity provider base URL, example: https://idp.tld")
                .env("GATEHOUSE_IDP_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .long("session-cookie")
                .help("Name of the session cookie issued by the identity provider")
                .default_value(crate::cli::globals::DEFAULT_SESSION_COOKIE)
                .env("GATEHOUSE_SESSION_COOKIE"),
        )
        .arg(
            Arg::new(ARG_SESSION_TIMEOUT)
                .long("session-timeout")
                .help("Seconds to wait for the identity provider before treating the request as anonymous")
                .default_value("5")
                .env("GATEHOUSE_SESSION_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..=60)),
        );

    logging::with_args(command)
}
