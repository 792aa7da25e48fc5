//! Runtime settings loaded via OrthoConfig.
//!
//! One settings struct per collaborator. Their prefixes give the familiar
//! environment names (`MICROCMS_API_KEY`, `POSTAL_CODE_API_BASE_URL`,
//! `GOOGLE_APPS_SCRIPT_URL`, `NEXT_PUBLIC_BASE_URL`, ...). Every collaborator
//! value is optional: a missing one disables that adapter and is reported
//! per request rather than at start-up. Each struct also carries one
//! defaulted plain field, so it loads even when no variable with its prefix
//! is set. `<PREFIX>_DISABLED=true` switches a collaborator off outright.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::RuntimeEnvironment;
use crate::outbound::microcms::DEFAULT_GUEST_ENDPOINT;
use crate::outbound::postal_code::PostalCodeCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;

/// Errors raised while loading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// OrthoConfig could not load a settings struct.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// A required value is absent.
    #[error("{name} is not set")]
    Missing {
        /// Environment variable name.
        name: &'static str,
    },
    /// The collaborator was switched off through its `*_DISABLED` flag.
    #[error("{name} is set")]
    Disabled {
        /// Environment variable name.
        name: &'static str,
    },
    /// A URL value does not parse.
    #[error("{name} is not a valid URL: {message}")]
    InvalidUrl {
        /// Environment variable name.
        name: &'static str,
        /// Parser message.
        message: String,
    },
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, SettingsError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { name })
}

fn required_url(value: Option<&str>, name: &'static str) -> Result<Url, SettingsError> {
    Url::parse(required(value, name)?).map_err(|error| SettingsError::InvalidUrl {
        name,
        message: error.to_string(),
    })
}

fn ensure_enabled(disabled: bool, name: &'static str) -> Result<(), SettingsError> {
    if disabled {
        Err(SettingsError::Disabled { name })
    } else {
        Ok(())
    }
}

/// Server settings (`INVITATION_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INVITATION")]
pub struct InvitationSettings {
    /// Listen address, default `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// `development`, `production` or `test`; unknown values mean
    /// production.
    pub environment: Option<String>,
    /// Timeout applied to every upstream call, in seconds.
    #[ortho_config(default = 10)]
    pub upstream_timeout_seconds: u64,
}

impl Default for InvitationSettings {
    fn default() -> Self {
        Self {
            bind_addr: None,
            environment: None,
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

impl InvitationSettings {
    /// Configured listen address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured runtime environment.
    pub fn environment(&self) -> RuntimeEnvironment {
        RuntimeEnvironment::resolve(self.environment.as_deref())
    }

    /// Configured upstream timeout, ten seconds unless overridden.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

/// Upstream postal-code API settings (`POSTAL_CODE_API_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POSTAL_CODE_API")]
pub struct PostalCodeApiSettings {
    /// Switch the postal-code adapter off.
    #[ortho_config(default = false)]
    pub disabled: bool,
    /// API root, e.g. `https://api.da.pf.japanpost.jp/`.
    pub base_url: Option<String>,
    /// OAuth client id.
    pub client_id: Option<String>,
    /// OAuth client secret.
    pub secret_key: Option<String>,
}

impl PostalCodeApiSettings {
    /// API root and credentials, when all three values are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed value.
    pub fn resolve(&self) -> Result<(Url, PostalCodeCredentials), SettingsError> {
        ensure_enabled(self.disabled, "POSTAL_CODE_API_DISABLED")?;
        let base_url = required_url(self.base_url.as_deref(), "POSTAL_CODE_API_BASE_URL")?;
        let client_id = required(self.client_id.as_deref(), "POSTAL_CODE_API_CLIENT_ID")?;
        let secret_key = required(self.secret_key.as_deref(), "POSTAL_CODE_API_SECRET_KEY")?;
        Ok((
            base_url,
            PostalCodeCredentials {
                client_id: client_id.to_owned(),
                secret_key: secret_key.to_owned(),
            },
        ))
    }
}

/// microCMS settings (`MICROCMS_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MICROCMS")]
pub struct MicroCmsSettings {
    /// Switch the guest repository off.
    #[ortho_config(default = false)]
    pub disabled: bool,
    /// Service subdomain, the `<name>` of `<name>.microcms.io`.
    pub service_domain: Option<String>,
    /// Read API key.
    pub api_key: Option<String>,
    /// List endpoint holding guests, default `guests`.
    pub guest_endpoint: Option<String>,
}

impl MicroCmsSettings {
    /// Service domain and API key, when both are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing value.
    pub fn resolve(&self) -> Result<(&str, &str), SettingsError> {
        ensure_enabled(self.disabled, "MICROCMS_DISABLED")?;
        Ok((
            required(self.service_domain.as_deref(), "MICROCMS_SERVICE_DOMAIN")?,
            required(self.api_key.as_deref(), "MICROCMS_API_KEY")?,
        ))
    }

    /// Configured guest endpoint, falling back to the default.
    pub fn guest_endpoint(&self) -> &str {
        self.guest_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GUEST_ENDPOINT)
    }
}

/// Google Apps Script settings (`GOOGLE_APPS_SCRIPT_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GOOGLE_APPS_SCRIPT")]
pub struct AppsScriptSettings {
    /// Switch RSVP forwarding off.
    #[ortho_config(default = false)]
    pub disabled: bool,
    /// Web-app deployment URL receiving RSVPs.
    pub url: Option<String>,
}

impl AppsScriptSettings {
    /// Deployment URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or malformed.
    pub fn resolve(&self) -> Result<Url, SettingsError> {
        ensure_enabled(self.disabled, "GOOGLE_APPS_SCRIPT_DISABLED")?;
        required_url(self.url.as_deref(), "GOOGLE_APPS_SCRIPT_URL")
    }
}

/// Public site settings (`NEXT_PUBLIC_*`).
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NEXT_PUBLIC")]
pub struct PublicSiteSettings {
    /// Treat the public origin as unknown.
    #[ortho_config(default = false)]
    pub disabled: bool,
    /// Public origin of the deployed site.
    pub base_url: Option<String>,
}

impl PublicSiteSettings {
    /// Site origin.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing or malformed.
    pub fn resolve(&self) -> Result<Url, SettingsError> {
        ensure_enabled(self.disabled, "NEXT_PUBLIC_DISABLED")?;
        required_url(self.base_url.as_deref(), "NEXT_PUBLIC_BASE_URL")
    }
}

/// Every settings struct, loaded together.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Server settings.
    pub invitation: InvitationSettings,
    /// Postal-code API settings.
    pub postal_code_api: PostalCodeApiSettings,
    /// microCMS settings.
    pub microcms: MicroCmsSettings,
    /// Apps Script settings.
    pub apps_script: AppsScriptSettings,
    /// Public site settings.
    pub public_site: PublicSiteSettings,
}

impl Settings {
    /// Load settings; `args` (program name first) only feed the server
    /// settings, collaborators are read from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when any struct fails to load.
    pub fn load_from_iter<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let program = args
            .first()
            .cloned()
            .unwrap_or_else(|| OsString::from("invitation"));
        let load_error = |error: &dyn std::fmt::Display| SettingsError::Load(error.to_string());
        Ok(Self {
            invitation: InvitationSettings::load_from_iter(args)
                .map_err(|e| load_error(&e))?,
            postal_code_api: PostalCodeApiSettings::load_from_iter([program.clone()])
                .map_err(|e| load_error(&e))?,
            microcms: MicroCmsSettings::load_from_iter([program.clone()])
                .map_err(|e| load_error(&e))?,
            apps_script: AppsScriptSettings::load_from_iter([program.clone()])
                .map_err(|e| load_error(&e))?,
            public_site: PublicSiteSettings::load_from_iter([program])
                .map_err(|e| load_error(&e))?,
        })
    }
}
