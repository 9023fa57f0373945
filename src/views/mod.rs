//! Static, stateless views rendered by the server outside the guarded
//! composition: the loading interstitial, the authentication error page, the
//! sign-in entry point, and the not-found content.

mod auth_error;
mod loading;
mod login;
mod not_found;

pub use auth_error::{auth_error, AUTH_ERROR_TITLE};
pub use loading::loading;
pub use login::login;
pub use not_found::not_found;
