pub mod auth;
pub mod profile;
pub mod projects;
pub mod server;
pub mod services;
pub mod support;
