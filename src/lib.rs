//! Bank account service: an account entity with a never-negative balance,
//! a transactional account store, a service layer and an HTTP surface.

pub mod api;
pub mod config;
pub mod import;
pub mod models;
pub mod report;
pub mod service;
pub mod storage;
pub mod types;
