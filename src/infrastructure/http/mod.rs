//! HTTP client adapters.

pub mod caching;
pub mod client;

pub use caching::CachingFetcher;
pub use client::ReqwestFetcher;
