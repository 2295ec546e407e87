//! Staging configuration.

/// FTP staging configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct StagingConfig {
    /// FTP host, `host` or `host:port` (port 21 assumed when absent).
    pub host: String,
    pub user: String,
    pub password: String,
    /// Public base URL under which staged objects are reachable.
    pub public_domain: String,
    /// Remote working directory, created if absent.
    pub remote_dir: String,
}

impl StagingConfig {
    /// Read staging configuration from the environment.
    ///
    /// Returns `None` when any required variable is missing; staging is an
    /// optional collaborator and absence is not an error.
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("FTP_HOST").ok()?;
        let user = std::env::var("FTP_USER").ok()?;
        let password = std::env::var("FTP_PASSWORD").ok()?;
        let public_domain = std::env::var("FTP_PUBLIC_DOMAIN").ok()?;
        let remote_dir = std::env::var("FTP_DIR").unwrap_or_else(|_| "videos".to_string());

        Some(Self {
            host,
            user,
            password,
            public_domain,
            remote_dir,
        })
    }

    /// Host with an explicit port for the control connection.
    pub fn addr(&self) -> String {
        if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:21", self.host)
        }
    }
}
