//! Game fan site: review moderation server and headless client.

pub mod action;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
