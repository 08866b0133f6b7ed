pub mod login;
pub mod oauth;
