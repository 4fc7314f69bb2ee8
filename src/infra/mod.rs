// Adapters for the ports defined in `app::ports`

pub mod http_client;

pub use http_client::ReqwestSource;
