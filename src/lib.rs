//! Library exports for reusing aircanvas subsystems.
//!
//! Exposes the drawing session alongside the supporting modules it relies on
//! so that external hosts (e.g. a camera hand-tracking frontend) can drive a
//! session directly and share configuration and validation logic with the
//! main binary.

pub mod config;
pub mod draw;
pub mod input;
pub mod recognize;
pub mod session;
pub mod store;
pub mod util;

pub use config::Config;
pub use session::{Sample, Session, SessionError, SharedSession, Status};
