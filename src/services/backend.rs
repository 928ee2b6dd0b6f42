// SPDX-License-Identifier: MIT

//! REST client for the ride/route persistence backend.
//!
//! Bearer-token authenticated where the backend requires it. Failures are
//! terminal: there is no retry or backoff, the caller re-triggers the
//! action.

use crate::error::{AppError, Result};
use crate::models::{CreatedRoute, NewRide, NewRoute, SavedRoute, UserProfile};
use crate::session::AuthSession;
use serde::Deserialize;

/// Backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: AuthSession,
}

impl ApiClient {
    /// Create a client against the given base URL with a shared session.
    pub fn new(base_url: impl Into<String>, session: AuthSession) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Fetch the authenticated profile.
    ///
    /// Returns `Ok(None)` without touching the network when no token is
    /// present: an absent session is a skip, not an error.
    pub async fn profile(&self) -> Result<Option<UserProfile>> {
        let Some(token) = self.session.token() else {
            tracing::debug!("no session token, skipping profile fetch");
            return Ok(None);
        };

        let url = format!("{}/usuarios/perfil", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Some(Self::check_response_json(response).await?))
    }

    /// Log out and destroy the local session.
    pub async fn logout(&self) -> Result<()> {
        let token = self.require_token()?;
        let url = format!("{}/logout/", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Self::check_response(response).await?;
        self.session.clear();
        tracing::info!("logged out");
        Ok(())
    }

    /// Fetch the editable profile fields.
    pub async fn editable_profile(&self) -> Result<UserProfile> {
        let token = self.require_token()?;
        let url = format!("{}/usuario/", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// Update username/email.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<()> {
        let token = self.require_token()?;
        let url = format!("{}/usuario/", self.base_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(profile)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Self::check_response(response).await
    }

    /// List the saved routes.
    pub async fn list_routes(&self) -> Result<Vec<SavedRoute>> {
        let token = self.require_token()?;
        let url = format!("{}/rotas/listar", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// Create a route; the returned id gates ride persistence.
    pub async fn create_route(&self, route: &NewRoute) -> Result<CreatedRoute> {
        let token = self.require_token()?;
        let url = format!("{}/rotas/criar/", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(route)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let created: CreatedRoute = Self::check_response_json(response).await?;
        tracing::info!(route_id = created.id, "route created");
        Ok(created)
    }

    /// Create a ride bound to an already-saved route.
    pub async fn create_ride(&self, ride: &NewRide) -> Result<()> {
        let token = self.require_token()?;
        let url = format!("{}/pedaladas/criar/", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(ride)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Self::check_response(response).await?;
        tracing::info!(route_id = ride.route_id, "ride created");
        Ok(())
    }

    fn require_token(&self) -> Result<String> {
        self.session.token().ok_or(AppError::Unauthorized)
    }

    /// Check response status and return an error if not successful.
    async fn check_response(response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::status_error(response).await)
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))
    }

    async fn status_error(response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 401 {
            return AppError::Unauthorized;
        }
        AppError::Api {
            status: status.as_u16(),
            body,
        }
    }
}
