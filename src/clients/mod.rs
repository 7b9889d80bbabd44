pub mod serp_client;

pub use serp_client::SerpApiClient;
