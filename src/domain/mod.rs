//! Core flow state: session, link entries, payment arithmetic.
//!
//! Pure data structures with validation logic. The only seam to the outside
//! is the credential verifier port.

pub mod link;
pub mod payment;
pub mod ports;
pub mod session;
