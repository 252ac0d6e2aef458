use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Maximum number of deployments inlined into the dashboard page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
        }
    }
}

fn default_page_limit() -> u64 {
    1000
}
