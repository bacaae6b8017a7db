pub mod chat;
pub mod config;
pub mod db;
pub mod logging;
pub mod quiz;
pub mod sessions;
pub mod telegram;
pub mod word;
