//! Service layer for the governance subsystems.
//!
//! This module contains the service layer of the application, which sits between the
//! bot handler layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Invite attribution, occupancy thresholds, restriction lifecycle
//! - **Orchestration**: Coordinating repository calls and platform commands
//! - **In-memory State**: Owning the snapshot, occupancy and restriction stores
//! - **Serialization**: Taking per-key locks so one member's state has a single writer

pub mod ingest;
pub mod invite;
pub mod lock;
pub mod notice;
pub mod restriction;
pub mod voice;
