use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Origin permitted for browser-based access to the API.
const ALLOWED_ORIGIN: &str = "http://localhost";

/// Static cross-origin policy: one fixed origin with credentials, any
/// method, any header. The wildcard cannot be sent alongside credentials,
/// so "any" is expressed by mirroring the request.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static(ALLOWED_ORIGIN))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
