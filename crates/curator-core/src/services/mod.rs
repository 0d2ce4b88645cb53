//! Domain services (business logic)

pub mod session_list_service;
pub mod share_service;

pub use session_list_service::SessionListService;
pub use share_service::{QrArtifact, ShareOptions, ShareService};
