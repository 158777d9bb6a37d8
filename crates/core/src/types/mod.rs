//! Core types for TutorConnect.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod board;
pub mod city;
pub mod class;
pub mod email;
pub mod fee;
pub mod id;
pub mod phone;
pub mod role;
pub mod status;

pub use board::{Board, BoardError};
pub use city::{City, CityError};
pub use class::{ClassLevel, ClassRange, ClassRangeError};
pub use email::{Email, EmailError};
pub use fee::{Fee, FeeError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use role::Role;
pub use status::UnlockStatus;
