pub mod credentials;
pub mod dto;
pub mod http;

pub use credentials::FileCredentialStore;
pub use http::HttpStoryApi;
