#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`CatalogerError`)
//! - [`config`]: Cataloger configuration (`CatalogerConfig`, builder)
//! - [`types`]: Domain types (`Ecosystem`, `CatalogEntry`, `SbomFormat`, `SbomDocument`)
//! - [`purl`]: Package URL value type, encoder and parser (`PackageUrl`, `QualifierKey`)
//! - [`ownership`]: Owned-file derivation (`owned_paths`)
//! - [`apk`]: Alpine package metadata (`ApkMetadata`, `ApkFileRecord`)
//! - [`package`]: Ecosystem dispatch (`PackageMetadata`, `PackageIdentity`)
//! - [`event`]: Catalog progress events (`CatalogEvent`)
//! - [`cataloger`]: Concurrent batch cataloger (`Cataloger`, `CatalogerBuilder`)
//! - [`sbom`]: SBOM document generation (`SbomGenerator`, CycloneDX, SPDX)
//!
//! # Architecture
//!
//! ```text
//! Vec<PackageMetadata> --> Cataloger --(workers)--> package_url() + owned_files()
//!                              |                              |
//!                         CatalogEvent                  Vec<CatalogEntry>
//!                              |                              |
//!                       mpsc --> consumer               SbomGenerator
//!                                                             |
//!                                                       SbomDocument
//! ```

pub mod apk;
pub mod cataloger;
pub mod config;
pub mod error;
pub mod event;
pub mod ownership;
pub mod package;
pub mod purl;
pub mod sbom;
pub mod types;

// --- Public API Re-exports ---

// Cataloger (batch orchestrator)
pub use cataloger::{Cataloger, CatalogerBuilder};

// Configuration
pub use config::{CatalogerConfig, CatalogerConfigBuilder};

// Error
pub use error::CatalogerError;

// Events
pub use event::{CatalogEvent, CatalogEventKind};

// Types
pub use types::{CatalogEntry, Ecosystem, SbomDocument, SbomFormat};

// Package identity
pub use apk::{ApkFileRecord, ApkMetadata};
pub use package::{PackageIdentity, PackageMetadata};
pub use purl::{PackageUrl, PurlError, QualifierKey};

// SBOM Generator
pub use sbom::SbomGenerator;
