//! CSP credentials, access-token sessions and org scope.

use crate::model::{ApiToken, ResourceModel};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use zeroize::Zeroizing;

use super::AuthError;

/// Caller-supplied credential material
#[derive(Debug, Clone)]
pub struct Credentials {
    /// CSP base URL, e.g. `https://console.cloud.vmware.com`
    pub csp_url: String,
    pub refresh_token: ApiToken,
}

impl Credentials {
    /// Credentials carried by a resource model
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredential` if `CSPProdURL` or `AccessToken` is absent.
    pub fn from_model(model: &ResourceModel) -> Result<Self, AuthError> {
        let csp_url = model
            .csp_prod_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(AuthError::MissingCredential("CSPProdURL"))?;
        let refresh_token = model
            .access_token
            .as_ref()
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingCredential("AccessToken"))?;
        Ok(Self {
            csp_url: csp_url.to_string(),
            refresh_token: refresh_token.clone(),
        })
    }
}

/// Access token obtained from CSP, valid until `expires_at`
#[derive(Clone)]
pub struct Session {
    access_token: Zeroizing<String>,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, expires_in: Duration) -> Self {
        let lifetime = chrono::Duration::from_std(expires_in).unwrap_or(chrono::Duration::MAX);
        Self {
            access_token: Zeroizing::new(access_token.into()),
            expires_at: Utc::now()
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token expires within `skew` from now
    pub fn needs_refresh(&self, skew: Duration) -> bool {
        let skew = chrono::Duration::from_std(skew).unwrap_or(chrono::Duration::MAX);
        match Utc::now().checked_add_signed(skew) {
            Some(deadline) => deadline >= self.expires_at,
            None => true,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// VMC API base URL and organization every call is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgScope {
    pub base_url: String,
    pub org_id: String,
}

impl OrgScope {
    pub fn new(base_url: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            org_id: org_id.into(),
        }
    }

    /// Scope carried by a resource model; the error names the missing field
    pub fn from_model(model: &ResourceModel) -> Result<Self, &'static str> {
        let base_url = non_empty(model.prod_url.as_deref()).ok_or("ProdURL")?;
        let org_id = non_empty(model.org_id.as_deref()).ok_or("OrgID")?;
        Ok(Self::new(base_url, org_id))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
