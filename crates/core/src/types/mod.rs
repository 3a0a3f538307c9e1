//! Shared newtype wrappers and enumerations.

pub mod color;
pub mod email;
pub mod id;
pub mod step;

pub use color::{HexColor, HexColorError};
pub use email::{Email, EmailError};
pub use id::*;
pub use step::OnboardingStep;
