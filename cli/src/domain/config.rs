//! Client configuration, threaded explicitly through every service call.

use anyhow::Result;

/// Connection and identity parameters for the orchestration platform API.
///
/// Built once from CLI arguments (with `RANCHER_*` environment defaults)
/// and passed by reference everywhere — never held in ambient statics.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://rancher.example.com`.
    pub base_url: String,
    pub access_key: String,
    pub secret_key: String,
    /// Project (environment) id, required by v2-beta endpoints.
    pub project_id: Option<String>,
    /// Load-balancer service id the link commands operate on.
    pub load_balancer_id: Option<String>,
    pub timeouts: WaitTimeouts,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Fails when no project id was supplied.
    pub fn project_id(&self) -> Result<&str> {
        self.project_id
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("missing project id (--project-id or RANCHER_PROJECT_ID)"))
    }

    /// # Errors
    ///
    /// Fails when no load-balancer id was supplied.
    pub fn load_balancer_id(&self) -> Result<&str> {
        self.load_balancer_id.as_deref().ok_or_else(|| {
            anyhow::anyhow!("missing load balancer id (--load-balancer-id or RANCHER_LB_ID)")
        })
    }
}

/// Per-transition wait deadlines, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct WaitTimeouts {
    pub upgrade: u64,
    pub active: u64,
    pub healthy: u64,
}

impl Default for WaitTimeouts {
    fn default() -> Self {
        Self {
            upgrade: 360,
            active: 360,
            healthy: 360,
        }
    }
}
