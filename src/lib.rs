pub mod core;
pub mod http;
pub mod provider;
pub mod util;
