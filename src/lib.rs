pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod models;
pub mod ranking;
pub mod slug;
pub mod youtube;

pub use db::create_pool;
