//! Federated sign-in popup. The provider redirects the popup back to the
//! in-app callback route; its URL is then exchanged for a session. Until that
//! redirect the popup is cross-origin and its location cannot be read.

use crate::features::auth::errors::GatewayError;
use url::Url;

pub const CALLBACK_PATH: &str = "/auth/callback";

/// Passes `result` through, calling `close` first when it is an error. Every
/// failed step between opening the popup and the callback goes through here.
pub fn close_on_error<T>(
    result: Result<T, GatewayError>,
    close: impl FnOnce(),
) -> Result<T, GatewayError> {
    if result.is_err() {
        close();
    }
    result
}

/// Whether `href` is the in-app callback page on `origin`.
pub fn is_callback_url(href: &str, origin: &str) -> bool {
    let (Ok(url), Ok(origin)) = (Url::parse(href), Url::parse(origin)) else {
        return false;
    };
    url.origin() == origin.origin() && url.path() == CALLBACK_PATH
}

#[cfg(target_arch = "wasm32")]
pub use browser::Popup;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::is_callback_url;
    use crate::features::auth::errors::{GatewayError, GatewayErrorKind};
    use gloo_timers::future::TimeoutFuture;

    const POLL_INTERVAL_MS: u32 = 250;
    const POPUP_FEATURES: &str = "popup,width=500,height=640";

    pub struct Popup {
        window: web_sys::Window,
    }

    impl Popup {
        /// Opens an empty popup. Call this before any await so the browser
        /// still attributes the open to the user's click.
        pub fn open() -> Result<Self, GatewayError> {
            let blocked = || {
                GatewayError::new(
                    GatewayErrorKind::PopupBlocked,
                    "The sign-in popup was blocked.",
                )
            };
            let window = web_sys::window()
                .ok_or_else(|| GatewayError::other("No browser window available."))?
                .open_with_url_and_target_and_features("about:blank", "gatehouse-auth", POPUP_FEATURES)
                .map_err(|_| blocked())?
                .ok_or_else(blocked)?;
            Ok(Self { window })
        }

        pub fn navigate(&self, url: &str) -> Result<(), GatewayError> {
            self.window
                .location()
                .set_href(url)
                .map_err(|_| GatewayError::other("Unable to open the sign-in page."))
        }

        /// Waits until the popup lands on the callback route and returns its
        /// URL. Closing the popup first is a cancellation. There is no timeout.
        pub async fn wait_for_callback(self, origin: &str) -> Result<String, GatewayError> {
            loop {
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if self.window.closed().unwrap_or(true) {
                    return Err(GatewayError::new(
                        GatewayErrorKind::PopupClosedByUser,
                        "The sign-in popup was closed.",
                    ));
                }
                if let Ok(href) = self.window.location().href()
                    && is_callback_url(&href, origin)
                {
                    let _ = self.window.close();
                    return Ok(href);
                }
            }
        }

        pub fn close(&self) {
            let _ = self.window.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{close_on_error, is_callback_url};
    use crate::features::auth::errors::GatewayError;
    use std::cell::Cell;

    #[test]
    fn failed_step_closes_the_popup() {
        let closed = Cell::new(false);

        let result: Result<(), _> = close_on_error(
            Err(GatewayError::other("Unable to open the sign-in page.")),
            || closed.set(true),
        );

        assert!(result.is_err());
        assert!(closed.get());
    }

    #[test]
    fn successful_step_leaves_the_popup_open() {
        let closed = Cell::new(false);

        let result = close_on_error(Ok("https://accounts.example.com/o/auth"), || {
            closed.set(true);
        });

        assert_eq!(result, Ok("https://accounts.example.com/o/auth"));
        assert!(!closed.get());
    }

    #[test]
    fn callback_must_match_origin_and_path() {
        let origin = "https://app.example.com";
        assert!(is_callback_url(
            "https://app.example.com/auth/callback?state=abc#id_token=x",
            origin
        ));
        assert!(!is_callback_url("https://app.example.com/login", origin));
        assert!(!is_callback_url(
            "https://evil.example.com/auth/callback",
            origin
        ));
        assert!(!is_callback_url("about:blank", origin));
    }
}
