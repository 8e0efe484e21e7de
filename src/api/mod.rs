//! Backend API abstraction.
//!
//! This module provides the trait and implementations for talking to the
//! gallery backend without tying the picker logic to a transport.

pub mod auth;
pub mod backend;
pub mod http;
pub mod testing;

pub use auth::AuthContext;
pub use backend::MediaBackend;
pub use http::HttpBackend;
pub use testing::InMemoryBackend;
