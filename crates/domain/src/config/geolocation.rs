use serde::{Deserialize, Serialize};

pub const IP_PLACEHOLDER: &str = "{ip}";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeolocationConfig {
    /// URL template; `{ip}` is replaced with the address being looked up.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GeolocationConfig {
    pub fn url_for(&self, ip: &str) -> String {
        self.endpoint.replace(IP_PLACEHOLDER, ip)
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://ip-api.com/json/{ip}?fields=status,message,country,city,lat,lon".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
