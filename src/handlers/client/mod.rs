pub mod login;
pub mod profile;
pub mod projects;
pub mod signup;
pub mod support;
mod utils;
