pub mod credential;
pub mod entity;
