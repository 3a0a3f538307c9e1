//! Onboarding step enumerator.

use serde::{Deserialize, Serialize};

/// Where an identified-but-not-fully-authenticated user stands in account
/// setup.
///
/// Returned by the backend's `login-start` endpoint. The value is computed
/// per request and never cached; it exists only to select the next
/// navigation destination.
///
/// Any wire value this client does not recognize deserializes to
/// [`OnboardingStep::Unknown`], which routes the user back to the
/// identification page instead of silently doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStep {
    /// The account exists but has no password yet.
    CreatePassword,
    /// The account has a password but is missing profile information.
    ProfileInfo,
    /// Profile is complete; the final confirmation step remains.
    FinalStep,
    /// The account is fully set up; a password login is required.
    PasswordCheck,
    /// Unrecognized step value from the backend.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        let step: OnboardingStep = serde_json::from_str("\"create-password\"").unwrap();
        assert_eq!(step, OnboardingStep::CreatePassword);

        let step: OnboardingStep = serde_json::from_str("\"profile-info\"").unwrap();
        assert_eq!(step, OnboardingStep::ProfileInfo);

        let step: OnboardingStep = serde_json::from_str("\"final-step\"").unwrap();
        assert_eq!(step, OnboardingStep::FinalStep);

        let step: OnboardingStep = serde_json::from_str("\"password-check\"").unwrap();
        assert_eq!(step, OnboardingStep::PasswordCheck);
    }

    #[test]
    fn test_unrecognized_value_falls_back() {
        let step: OnboardingStep = serde_json::from_str("\"biometric-scan\"").unwrap();
        assert_eq!(step, OnboardingStep::Unknown);
    }
}
