//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two limiter profiles:
//! - `auth_rate_limiter`: strict limits for the login endpoint (~10/min)
//! - `api_rate_limiter`: relaxed limits for the rest of the API (~100/min)

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Key extractor that takes the client IP from reverse-proxy headers,
/// falling back through the common ones in order of trust.
///
/// Direct connections (no proxy headers, as in local development) all
/// share one loopback bucket rather than failing the request.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // X-Forwarded-For (first IP in the chain)
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // X-Real-IP
        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 token every 6 seconds (replenish), burst of 5. Keeps
/// credential stuffing off the login and registration endpoints.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers, which are always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for general API: ~100 requests per minute per IP.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers, which are always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn api_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(1)
        .burst_size(50)
        .finish()
        .expect("rate limiter config with per_second(1) and burst_size(50) is valid");
    GovernorLayer::new(Arc::new(config))
}
