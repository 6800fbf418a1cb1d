pub mod catalog;
pub mod game_service;
pub mod grid;
pub mod search;
pub mod thumbnail;
