//! Infrastructure layer for jsonstore.
//!
//! Contains OS-facing adapters: filesystem access and process environment
//! capture.
//!
//! **Dependency rule**: this layer may depend on `jsonstore_core`, but MUST
//! NOT import from `application`.

pub mod environment;
pub mod storage;
