//! Request handlers

pub mod health;
pub mod quotations;
pub mod rule_tables;
