pub mod commands;
pub mod config;
pub mod domain;
pub mod github;
pub mod http;
pub mod pipeline;
pub mod repository;
