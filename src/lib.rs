pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod flashcards;
pub mod generation;
pub mod handlers;
pub mod paths;
pub mod planner;
pub mod progress;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;
