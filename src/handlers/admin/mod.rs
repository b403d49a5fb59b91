pub mod about;
pub mod clients;
pub mod contacts;
pub mod projects;
pub mod services;
pub mod support;
