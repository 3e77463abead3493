mod client;

pub use client::HttpBackendClient;
