//! Cookie-based device identity.
//!
//! A random identifier is issued once per browser in a long-lived cookie and
//! used as the natural key that deduplicates votes. This is a weak,
//! spoofable identity (clearing cookies allows re-voting); that trade-off is
//! deliberate and kept as-is, not a security control.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

pub const DEVICE_COOKIE: &str = "device_id";

/// Identifier shared by every client without a device cookie. All such
/// clients collide into one rating slot per entrant.
pub const ANONYMOUS_DEVICE: &str = "anonymous";

const COOKIE_MAX_AGE: Duration = Duration::days(365);

/// The calling device's identifier, or the anonymous sentinel.
pub fn device_id(jar: &CookieJar) -> String {
    jar.get(DEVICE_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| ANONYMOUS_DEVICE.to_string())
}

/// Issue a fresh device identifier unless the jar already carries one.
pub fn ensure_device_cookie(jar: CookieJar) -> CookieJar {
    if jar.get(DEVICE_COOKIE).is_some() {
        return jar;
    }

    let cookie = Cookie::build((DEVICE_COOKIE, Uuid::new_v4().to_string()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(COOKIE_MAX_AGE)
        .build();

    jar.add(cookie)
}
