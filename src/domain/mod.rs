//! Pure domain types: commands, payment method results, the canonical response
//! schema and the ports through which the external payment UI is driven.

pub mod command;
pub mod normalizer;
pub mod payment_method;
pub mod ports;
pub mod response;
