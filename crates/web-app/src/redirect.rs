use log::error;
use rutina_domain::LoginRedirect;

pub const LOGIN_ROUTE: &str = "/login";

/// Hard navigation of the browser window to the login route.
pub struct BrowserRedirect;

impl LoginRedirect for BrowserRedirect {
    fn redirect_to_login(&self) {
        if let Err(err) = gloo_utils::window().location().set_href(LOGIN_ROUTE) {
            error!("failed to redirect to login: {err:?}");
        }
    }
}
