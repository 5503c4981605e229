//! # LMS API Library
//!
//! Multi-tenant learning management backend: organizations own courses,
//! lessons, and lesson items; users enroll, track progress, and submit
//! quizzes. Every repository read and write carries an implicit tenant
//! and soft-delete predicate.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod quiz;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod tenant;
pub use migration;
