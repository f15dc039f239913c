// src/models/mod.rs

pub mod book;
pub mod personality;
pub mod question;
pub mod student;
