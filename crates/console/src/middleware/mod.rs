//! Request middleware: access gate, session cookie helpers, request IDs.

pub mod gate;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use gate::{GateDecision, access_gate, decide};
pub use session::{ACCESS_TOKEN_COOKIE, expired_session_cookie, has_session_cookie, session_cookie};
