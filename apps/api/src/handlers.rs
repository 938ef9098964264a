pub mod company;
pub mod health;
pub mod security;
