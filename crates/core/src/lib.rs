//! Barrio Core - Shared types library.
//!
//! This crate provides common types used across the Barrio components:
//! - `console` - Browser-facing administration console and onboarding flow
//! - `integration-tests` - End-to-end tests against a stub backend
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere, including form validation that must run before any network call.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, hex colors, and
//!   the backend's onboarding step enumerator
//! - [`validate`] - Pure validation predicates shared by all form pages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validate;

pub use types::*;
