//! Authentication primitives
//!
//! Token generation, the in-memory session store and the administrator
//! credential check. Nothing in here performs I/O.

pub mod credentials;
pub mod session;
pub mod token;

pub use credentials::CredentialValidator;
pub use session::{Session, SessionStore};
pub use token::{TOKEN_LEN, TokenGenerator};
