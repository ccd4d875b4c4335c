//! Request middleware

pub mod session;

pub use session::{admin_gate, session_gate, CurrentSession, SessionContext};
