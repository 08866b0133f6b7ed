pub mod encoding;
pub mod response;
pub mod server;
pub mod tls;
