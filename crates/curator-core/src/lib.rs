//! # Curator Core
//!
//! Domain entities, ports, the personalized list session store, and the
//! artifact generators (share links, QR codes, export documents, embeds).

pub mod domain;
pub mod services;
pub mod repositories;
pub mod artifacts;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
