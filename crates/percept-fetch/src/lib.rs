//! Retrieval layer: label table JSON and model weights over HTTP.

pub mod http;

pub use http::{FetchClient, FetchError};
