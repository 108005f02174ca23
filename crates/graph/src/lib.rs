pub mod auth;
pub mod client;
pub mod models;
pub mod paging;
pub mod security;
pub mod service;

pub use auth::{ClientCredentials, ClientCredentialsProvider};
pub use client::{GraphClient, GraphClientOptions};
pub use paging::PageIterator;
pub use service::GraphServiceClient;

