use std::time::Duration;
use url::Url;

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_COOKIE: &str = "gatehouse_session";
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(5);

const PROVIDER_LOGIN_PATH: &str = "login";

/// Process-wide configuration, read-only once the server starts.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub site_url: Url,
    pub idp_url: Url,
    /// Identity provider sign-in page, with `return_to` pointing at our callback.
    pub login_url: Url,
    pub session_cookie: String,
    pub session_timeout: Duration,
}

impl GlobalArgs {
    /// # Errors
    /// Returns an error if the login or callback URLs cannot be derived.
    pub fn new(site_url: Url, idp_url: Url) -> Result<Self, url::ParseError> {
        let login_url = provider_login_url(&site_url, &idp_url)?;
        Ok(Self {
            site_url,
            idp_url,
            login_url,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    #[must_use]
    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }
}

fn provider_login_url(site_url: &Url, idp_url: &Url) -> Result<Url, url::ParseError> {
    let callback = site_url.join(crate::gatehouse::handlers::auth::CALLBACK_ROUTE)?;

    let mut base = idp_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut login = base.join(PROVIDER_LOGIN_PATH)?;
    login
        .query_pairs_mut()
        .append_pair("return_to", callback.as_str());
    Ok(login)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() -> Result<(), url::ParseError> {
        let args = GlobalArgs::new(
            Url::parse("https://app.example.com")?,
            Url::parse("https://idp.example.com")?,
        )?;
        assert_eq!(args.site_url.as_str(), "https://app.example.com/");
        assert_eq!(args.session_cookie, DEFAULT_SESSION_COOKIE);
        assert_eq!(args.session_timeout, DEFAULT_SESSION_TIMEOUT);
        assert_eq!(
            args.login_url.as_str(),
            "https://idp.example.com/login?return_to=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"
        );
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), url::ParseError> {
        let args = GlobalArgs::new(
            Url::parse(DEFAULT_SITE_URL)?,
            Url::parse("http://localhost:8081/idp")?,
        )?
        .with_session_cookie("sid")
        .with_session_timeout(Duration::from_secs(1));
        assert_eq!(args.session_cookie, "sid");
        assert_eq!(args.session_timeout, Duration::from_secs(1));
        assert!(args.login_url.as_str().starts_with("http://localhost:8081/idp/login?"));
        Ok(())
    }
}
