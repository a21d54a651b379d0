//! HTTP client for the posts backend.

mod client;

pub use client::{ClientConfig, HttpSocialApi};

#[cfg(test)]
mod tests;
