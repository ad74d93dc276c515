#![forbid(unsafe_code)]

pub mod auth;
pub mod repository;
pub mod sqlite;
