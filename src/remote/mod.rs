// file: src/remote/mod.rs
// description: remote backend integration

pub mod client;

pub use client::BackendClient;
