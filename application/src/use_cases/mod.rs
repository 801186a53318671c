//! Use cases for the application layer

pub mod respond;
