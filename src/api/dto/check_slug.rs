//! DTOs for slug availability endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Availability;

#[derive(Debug, Default, Deserialize)]
pub struct CheckSlugRequest {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct CheckSlugResponse {
    pub available: bool,
    pub message: String,
}

impl From<Availability> for CheckSlugResponse {
    fn from(availability: Availability) -> Self {
        Self {
            available: availability.available,
            message: availability.message,
        }
    }
}
