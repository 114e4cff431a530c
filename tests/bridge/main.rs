//! Bridge integration tests.
//!
//! Starts an axum server with the bridge installed and exercises it with reqwest.

mod support;
mod publish;
mod request_reply;
