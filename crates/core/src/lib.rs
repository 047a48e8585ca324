//! Domain logic for the bid management backend.
//!
//! This crate has no internal dependencies and performs no I/O: it holds
//! constants, validation rules, the tender query builder and formatting
//! helpers shared by the repository and HTTP layers.

pub mod activity;
pub mod currency;
pub mod documents;
pub mod error;
pub mod finance;
pub mod import;
pub mod meeting;
pub mod not_relevant;
pub mod pagination;
pub mod roles;
pub mod tender;
pub mod tender_query;
pub mod types;
