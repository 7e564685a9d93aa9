//! Credential resolution for the Thordata APIs.
//!
//! Credentials are read once, when an adapter is built, and never again at
//! call time.

use crate::config::AppConfig;
use crate::error::Error;

/// Environment variable holding the required scraper token.
pub const SCRAPER_TOKEN_VAR: &str = "THORDATA_SCRAPER_TOKEN";

/// Resolved, immutable credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    scraper_token: String,
    public_token: Option<String>,
    public_key: Option<String>,
}

impl Credentials {
    /// Build credentials directly. Empty optional values are dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingCredential` if `scraper_token` is blank.
    pub fn new(
        scraper_token: impl Into<String>, public_token: Option<String>, public_key: Option<String>,
    ) -> Result<Self, Error> {
        let scraper_token = scraper_token.into();
        if scraper_token.trim().is_empty() {
            return Err(Error::MissingCredential { var: SCRAPER_TOKEN_VAR });
        }

        Ok(Self { scraper_token, public_token: non_blank(public_token), public_key: non_blank(public_key) })
    }

    pub fn scraper_token(&self) -> &str {
        &self.scraper_token
    }

    pub fn public_token(&self) -> Option<&str> {
        self.public_token.as_deref()
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("scraper_token", &"<redacted>")
            .field("public_token", &self.public_token.as_ref().map(|_| "<redacted>"))
            .field("public_key", &self.public_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Produces [`Credentials`] from process-wide configuration.
///
/// Reading is side-effect free and independent of call order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialResolver;

impl CredentialResolver {
    /// Resolve credentials from the environment (and the optional TOML
    /// override file).
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if configuration fails to load and
    /// `Error::MissingCredential` if the scraper token is absent or empty.
    pub fn resolve(&self) -> Result<Credentials, Error> {
        let config = AppConfig::load()?;
        self.resolve_from(&config)
    }

    /// Resolve credentials from an already-loaded configuration.
    pub fn resolve_from(&self, config: &AppConfig) -> Result<Credentials, Error> {
        let scraper_token = config
            .scraper_token
            .clone()
            .ok_or(Error::MissingCredential { var: SCRAPER_TOKEN_VAR })?;

        Credentials::new(scraper_token, config.public_token.clone(), config.public_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_resolve_from_config() {
        let config = AppConfig {
            scraper_token: Some("scraper".into()),
            public_token: Some("public".into()),
            public_key: None,
            ..Default::default()
        };

        let creds = CredentialResolver.resolve_from(&config).unwrap();
        assert_eq!(creds.scraper_token(), "scraper");
        assert_eq!(creds.public_token(), Some("public"));
        assert_eq!(creds.public_key(), None);
    }

    #[test]
    fn test_missing_scraper_token() {
        let config = AppConfig::default();
        let result = CredentialResolver.resolve_from(&config);
        assert!(matches!(result, Err(Error::MissingCredential { var: SCRAPER_TOKEN_VAR })));
    }

    #[test]
    fn test_blank_scraper_token() {
        let config = AppConfig { scraper_token: Some("   ".into()), ..Default::default() };
        let result = CredentialResolver.resolve_from(&config);
        assert!(matches!(result, Err(Error::MissingCredential { .. })));
    }

    #[test]
    fn test_blank_optionals_are_absent() {
        let creds = Credentials::new("scraper", Some(String::new()), Some("  ".into())).unwrap();
        assert_eq!(creds.public_token(), None);
        assert_eq!(creds.public_key(), None);
    }

    #[test]
    fn test_debug_redacts() {
        let creds = Credentials::new("very-secret", Some("also-secret".into()), None).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("also-secret"));
    }

    #[test]
    fn test_resolve_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env("THORDATA_SCRAPER_TOKEN", "env-token");
            jail.set_env("THORDATA_PUBLIC_KEY", "env-key");

            let creds = CredentialResolver.resolve().expect("credentials resolve");
            assert_eq!(creds.scraper_token(), "env-token");
            assert_eq!(creds.public_key(), Some("env-key"));
            Ok(())
        });
    }

    #[test]
    fn test_resolve_from_env_empty_token() {
        Jail::expect_with(|jail| {
            jail.set_env("THORDATA_SCRAPER_TOKEN", "");

            let result = CredentialResolver.resolve();
            assert!(matches!(result, Err(Error::MissingCredential { .. })));
            Ok(())
        });
    }
}
