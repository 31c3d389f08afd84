pub mod chat;
pub mod clear;
pub mod config;
pub mod explain;
pub mod home;
pub mod prompts;
pub mod recommend;
pub mod render;
pub mod search;
pub mod show;
pub mod spinner;
pub mod watchlist;
