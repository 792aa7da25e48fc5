//! Best-effort client IP for upstream `X-Forwarded-For` propagation.

use std::net::SocketAddr;

use actix_web::HttpRequest;

/// Address reported when the request carries none.
pub const DEFAULT_CLIENT_IP: &str = "127.0.0.1";

/// Client IP from `Forwarded`/`X-Forwarded-For` or the peer address, with
/// any port removed.
pub fn client_ip(req: &HttpRequest) -> String {
    let info = req.connection_info();
    info.realip_remote_addr()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map_or_else(|| DEFAULT_CLIENT_IP.to_owned(), without_port)
}

fn without_port(raw: &str) -> String {
    raw.parse::<SocketAddr>()
        .map_or_else(|_| raw.to_owned(), |addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case::forwarded_for("x-forwarded-for", "203.0.113.7, 10.0.0.1", "203.0.113.7")]
    #[case::forwarded("forwarded", "for=198.51.100.2;proto=https", "198.51.100.2")]
    fn proxy_headers_win(#[case] name: &str, #[case] value: &str, #[case] expected: &str) {
        let req = TestRequest::default()
            .insert_header((name, value))
            .to_http_request();
        assert_eq!(client_ip(&req), expected);
    }

    #[test]
    fn peer_address_loses_its_port() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:52100".parse().expect("socket addr"))
            .to_http_request();
        assert_eq!(client_ip(&req), "192.0.2.10");
    }

    #[test]
    fn missing_address_defaults_to_loopback() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(client_ip(&req), DEFAULT_CLIENT_IP);
    }
}
