/// Device and preference cookies
///
/// Preferences travel as URL-safe base64 of their JSON map so the value stays
/// inside the cookie-octet alphabet.
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpRequest;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use tracing::debug;

use crate::models::{DeviceId, PreferenceWeights};

pub const DEVICE_COOKIE: &str = "device_id";
pub const PREFERENCES_COOKIE: &str = "preferences";

const COOKIE_MAX_AGE_DAYS: i64 = 365;

/// Device from the request cookie, or a freshly issued one (`true` when new).
pub fn device_from_request(req: &HttpRequest) -> (DeviceId, bool) {
    match req
        .cookie(DEVICE_COOKIE)
        .and_then(|cookie| DeviceId::parse(cookie.value()))
    {
        Some(device) => (device, false),
        None => (DeviceId::generate(), true),
    }
}

/// `None` when the cookie is missing or cannot be decoded.
pub fn preferences_from_request(req: &HttpRequest) -> Option<PreferenceWeights> {
    let cookie = req.cookie(PREFERENCES_COOKIE)?;
    let decoded = decode_preferences(cookie.value());
    if decoded.is_none() {
        debug!("Ignoring malformed preferences cookie");
    }
    decoded
}

pub fn encode_preferences(preferences: &PreferenceWeights) -> String {
    // Serializing a map of integers cannot fail.
    let json = serde_json::to_vec(preferences).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

pub fn decode_preferences(value: &str) -> Option<PreferenceWeights> {
    let bytes = URL_SAFE_NO_PAD.decode(value.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub fn device_cookie(device: &DeviceId) -> Cookie<'static> {
    long_lived(DEVICE_COOKIE, device.as_str().to_string())
}

pub fn preferences_cookie(preferences: &PreferenceWeights) -> Cookie<'static> {
    long_lived(PREFERENCES_COOKIE, encode_preferences(preferences))
}

fn long_lived(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(COOKIE_MAX_AGE_DAYS))
        .finish()
}
