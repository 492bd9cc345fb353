pub mod auth;
pub mod basic;
pub mod middleware;
pub mod password;
pub mod security;
