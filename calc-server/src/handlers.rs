pub mod health;
pub mod operate;
