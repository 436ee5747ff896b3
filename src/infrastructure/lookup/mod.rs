pub mod client;
pub mod rate_limiter;
pub mod retry;

pub use client::{LookupClient, LookupSettings};
pub use rate_limiter::RateLimiter;
pub use retry::RetryPolicy;
