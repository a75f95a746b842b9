pub mod assets;
pub mod config;
pub mod http;
pub mod models;

pub use assets::UrlAssetResolver;
pub use config::CatalogConfig;
pub use http::HttpCatalog;
