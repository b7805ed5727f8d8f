//! Inbound adapters: how the outside world reaches the domain.

pub mod http;
