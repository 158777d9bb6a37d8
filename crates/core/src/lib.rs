//! TutorConnect Core - Shared domain library.
//!
//! This crate provides the domain model used across all TutorConnect
//! components:
//! - `site` - Public-facing site serving parents and tutors
//! - `admin` - Internal administration panel
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and enums for IDs, contact details,
//!   cities, boards, class levels, fees, roles, and unlock status
//! - [`domain`] - Entity structs shared between the binaries
//! - [`matching`] - The boolean predicate pairing parent requests with
//!   tutor profiles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod domain;
pub mod matching;
pub mod types;

pub use domain::*;
pub use types::*;
