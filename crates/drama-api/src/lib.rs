//! Client for the posting site's form-encoded HTTP API.

pub mod client;
pub mod error;
pub mod types;

pub use client::DramaClient;
pub use error::ApiError;
pub use types::{Ack, Listing, Post, RepostCheck, SiteComment};
