pub mod about;
pub mod client;
pub mod contact;
pub mod project;
pub mod service;
pub mod ticket;
