//! Onboarding step routing.
//!
//! After the backend identifies an account, exactly one destination exists
//! for it. The handlers redirect there with `303 See Other`; nothing is
//! retried or cached.

use barrio_core::OnboardingStep;

use crate::models::IdentifiedUser;

/// Compute the next destination for an identified account.
///
/// Profile fields unknown to the backend become empty parameters so the
/// destination pages can distinguish "not provided" from "absent". All
/// values are URL-encoded.
#[must_use]
pub fn next_destination(user: &IdentifiedUser) -> String {
    let user_id = user.id.to_string();
    let email = urlencoding::encode(&user.email);
    let first_name = urlencoding::encode(user.first_name.as_deref().unwrap_or(""));
    let last_name = urlencoding::encode(user.last_name.as_deref().unwrap_or(""));

    match user.next_step {
        OnboardingStep::CreatePassword => {
            format!("/signup/password?user_id={user_id}&email={email}")
        }
        OnboardingStep::ProfileInfo => format!(
            "/signup/profile?user_id={user_id}&email={email}&first_name={first_name}&last_name={last_name}"
        ),
        OnboardingStep::FinalStep => format!(
            "/signup/confirm?user_id={user_id}&email={email}&first_name={first_name}&last_name={last_name}"
        ),
        OnboardingStep::PasswordCheck => format!("/login?user_id={user_id}&email={email}"),
        OnboardingStep::Unknown => "/".to_string(),
    }
}
