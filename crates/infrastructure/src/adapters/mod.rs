//! Port adapters backed by external libraries.

mod reqwest_client;

pub use reqwest_client::ReqwestHttpClient;
