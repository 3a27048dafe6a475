use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::{from_fn, Next},
    Router,
};
use intake_models::client::ClientIdentifier;
use tracing::debug;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Attaches a [`ClientIdentifier`] to every request.
pub fn add<S: Clone + Send + Sync + 'static>(
    trust_forwarded_headers: bool,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        router.layer(from_fn(move |mut request: Request, next: Next| {
            let client = client_identifier(&request, trust_forwarded_headers);
            request.extensions_mut().insert(client);
            next.run(request)
        }))
    }
}

fn client_identifier(request: &Request, trust_forwarded_headers: bool) -> ClientIdentifier {
    let connection = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    if !trust_forwarded_headers {
        return connection
            .map(ClientIdentifier::new)
            .unwrap_or_else(ClientIdentifier::unknown);
    }

    let headers = request.headers();
    forwarded_for(headers)
        .or_else(|| header(headers, X_REAL_IP))
        .map(str::to_owned)
        .or_else(|| {
            debug!("no forwarded client address, using connection address");
            connection
        })
        .map(ClientIdentifier::new)
        .unwrap_or_else(ClientIdentifier::unknown)
}

fn forwarded_for(headers: &HeaderMap) -> Option<&str> {
    header(headers, X_FORWARDED_FOR)?
        .split(',')
        .map(str::trim)
        .next()
        .filter(|first| !first.is_empty())
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use axum::{body::Body, http};
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(headers: &[(&str, &str)], connection: bool) -> Request {
        let mut request = http::Request::builder();
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let mut request = request.body(Body::empty()).unwrap();
        if connection {
            request
                .extensions_mut()
                .insert(ConnectInfo(SocketAddr::from((
                    Ipv4Addr::new(192, 0, 2, 1),
                    4242,
                ))));
        }
        request
    }

    #[test]
    fn forwarded_for_first_entry() {
        // Arrange
        let request = request(
            &[
                ("X-Forwarded-For", "203.0.113.7, 10.0.0.1"),
                ("X-Real-IP", "198.51.100.1"),
            ],
            true,
        );

        // Act
        let result = client_identifier(&request, true);

        // Assert
        assert_eq!(result.as_str(), "203.0.113.7");
    }

    #[test]
    fn real_ip() {
        // Arrange
        let request = request(&[("X-Real-IP", "198.51.100.1")], true);

        // Act
        let result = client_identifier(&request, true);

        // Assert
        assert_eq!(result.as_str(), "198.51.100.1");
    }

    #[test]
    fn connection_address() {
        // Arrange
        let request = request(&[("X-Forwarded-For", " ")], true);

        // Act
        let result = client_identifier(&request, true);

        // Assert
        assert_eq!(result.as_str(), "192.0.2.1");
    }

    #[test]
    fn untrusted_headers_are_ignored() {
        // Arrange
        let request = request(&[("X-Forwarded-For", "203.0.113.7")], true);

        // Act
        let result = client_identifier(&request, false);

        // Assert
        assert_eq!(result.as_str(), "192.0.2.1");
    }

    #[test]
    fn unknown() {
        // Arrange
        let request = request(&[], false);

        // Act
        let result = client_identifier(&request, true);

        // Assert
        assert!(result.is_unknown());
    }
}
