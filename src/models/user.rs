//! User profile model.

use serde::{Deserialize, Serialize};

/// User profile as returned by `GET /usuario/` and accepted by
/// `PUT /usuario/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}
