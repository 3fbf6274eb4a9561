//! Request and response bodies

pub mod quotation;
pub mod rule_tables;
