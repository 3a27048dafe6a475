use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origin: Option<HeaderValue>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    |router| {
        let allow_origin = match allowed_origin {
            Some(origin) => AllowOrigin::exact(origin),
            None => AllowOrigin::any(),
        };

        router.layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
    }
}
