/// Middleware modules for the API server
///
/// - `rate_limit`: Redis-backed request rate limiting

pub mod rate_limit;
