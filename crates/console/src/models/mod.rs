//! Wire types mirroring the backend API.
//!
//! The backend owns these entities; the console only renders and relays
//! them. All JSON is camelCase on the wire.

use barrio_core::{CategoryId, OnboardingStep, SiteId, SiteImageId, UserId};
use serde::{Deserialize, Serialize};

/// A service category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Optional image URL for the category tile.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Optional `#RRGGBB` accent color.
    #[serde(default)]
    pub color: Option<String>,
    /// Whether sites in this category accept bookings.
    #[serde(default)]
    pub bookable: bool,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub bookable: bool,
}

/// A secondary image attached to a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteImage {
    pub id: SiteImageId,
    pub url: String,
    #[serde(default)]
    pub primary: bool,
}

/// A site (venue) in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    /// Main image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub neighborhood: String,
    pub street: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category_id: CategoryId,
    /// Revenue split: platform share, percent.
    pub platform_percentage: f64,
    /// Revenue split: transport share, percent.
    pub transport_percentage: f64,
    /// Revenue split: venue share, percent.
    pub venue_percentage: f64,
    /// Secondary images, absent when none exist.
    #[serde(default)]
    pub images: Option<Vec<SiteImage>>,
}

/// A user row as shown in the read-only user list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub validated: bool,
}

/// Response from the backend's `login-start` endpoint.
///
/// Identifies the account behind an email and reports which onboarding
/// step it needs next. The step is computed per request and never cached.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiedUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub next_step: OnboardingStep,
}

/// Response from the backend's `login-password` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserRow,
}
