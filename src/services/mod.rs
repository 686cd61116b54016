//! HTTP service implementations.

pub mod users;
