// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::AppError;
pub use service::QuestionService;
