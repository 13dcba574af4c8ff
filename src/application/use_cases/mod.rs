pub mod seed;
pub mod user_service;
pub mod verify;
