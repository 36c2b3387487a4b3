//! Auth domain - bearer token verification
//!
//! Login, registration and token refresh belong to an external service. This
//! domain only turns a verified token into an `Actor` for capability checks.

pub mod jwt;

pub use jwt::{Claims, JwtService};
