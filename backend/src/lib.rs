//! DataPulse backend: a multi-tenant form-analytics service.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and services;
//! `inbound` adapts HTTP onto the services; `outbound` implements the ports
//! against PostgreSQL or process memory.

pub mod demo_seed;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
