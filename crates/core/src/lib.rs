pub mod domain;
pub mod scoring;

pub mod config {
    use anyhow::Context;

    const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub port: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok().filter(|s| !s.trim().is_empty()),
                port: std::env::var("PORT").ok(),
            })
        }

        /// Listening port; only the HTTP service asks for it.
        pub fn require_port(&self) -> anyhow::Result<u16> {
            match self.port.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                None => Ok(DEFAULT_PORT),
                Some(v) => v
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {v:?})")),
            }
        }
    }

}
