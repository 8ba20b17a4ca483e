pub mod admin;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod poll;
pub mod views;
