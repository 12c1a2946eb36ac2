pub mod chat;
pub mod index;
pub mod pdf;
pub mod upload;
pub mod viewer;

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// One-shot flash message cookie, read and cleared on the next page view.
const FLASH_COOKIE: &str = "flash";

/// Queue a flash message for the next rendered page.
pub(crate) fn flash(jar: CookieJar, message: &str) -> CookieJar {
    let value = urlencoding::encode(message).into_owned();
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Take the pending flash message, clearing it from the jar.
pub(crate) fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let message = jar.get(FLASH_COOKIE).map(|cookie| {
        urlencoding::decode(cookie.value())
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| cookie.value().to_string())
    });
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, message)
}
