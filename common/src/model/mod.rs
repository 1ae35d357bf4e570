//! Domain models for the account platform

pub mod account;
pub mod customer;
