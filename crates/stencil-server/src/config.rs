//! Server settings
//!
//! Read from process environment locally (after `.env` is loaded) and from
//! Shuttle secrets when running as a Shuttle service.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::PathBuf;

use crate::services::gemini::DEFAULT_MODEL;

pub const API_KEY_VAR: &str = "GOOGLE_GENERATIVE_AI_API_KEY";
pub const DEFAULT_PORT: u16 = 3005;
const DEFAULT_LANDING_PAGE: &str = "public/index.html";
const DEFAULT_REDIRECT_TARGET: &str = "/index.html";

/// Who owns the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// This process binds `0.0.0.0:PORT`
    Local,
    /// The host invokes the router (Shuttle)
    Serverless,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Anything other than "production" counts as development
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How `GET /` is answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingPage {
    LocalFile(PathBuf),
    Redirect(String),
}

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub port: u16,
    pub deployment: Deployment,
    pub environment: Environment,
    pub model: String,
    /// Replaces the built-in default system prompt when set
    pub system_prompt: Option<String>,
    pub landing_file: PathBuf,
    pub redirect_target: String,
}

impl Settings {
    /// Build settings from a key lookup. Empty values count as unset.
    pub fn from_lookup<F>(deployment: Deployment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(api_key) = get(API_KEY_VAR) else {
            bail!("{} is not set", API_KEY_VAR);
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let environment = match get("STENCIL_ENV") {
            Some(raw) => Environment::parse(&raw),
            None => match deployment {
                Deployment::Local => Environment::Development,
                Deployment::Serverless => Environment::Production,
            },
        };

        Ok(Self {
            api_key,
            port,
            deployment,
            environment,
            model: get("STENCIL_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            system_prompt: get("STENCIL_SYSTEM_PROMPT"),
            landing_file: get("STENCIL_LANDING_PAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LANDING_PAGE)),
            redirect_target: get("STENCIL_REDIRECT_TARGET")
                .unwrap_or_else(|| DEFAULT_REDIRECT_TARGET.to_string()),
        })
    }

    /// Local process: loads `.env` if present, then reads the environment
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(Deployment::Local, |key| std::env::var(key).ok())
    }

    #[cfg(feature = "shuttle")]
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self> {
        Self::from_lookup(Deployment::Serverless, |key| secrets.get(key))
    }

    pub fn landing_page(&self) -> LandingPage {
        match self.environment {
            Environment::Development => LandingPage::LocalFile(self.landing_file.clone()),
            Environment::Production => LandingPage::Redirect(self.redirect_target.clone()),
        }
    }

    /// Configured override, or the built-in prompt
    pub fn default_system_prompt(&self) -> String {
        self.system_prompt
            .clone()
            .unwrap_or_else(stencil::default_system_prompt)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .field("port", &self.port)
            .field("deployment", &self.deployment)
            .field("environment", &self.environment)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt.is_some())
            .field("landing_file", &self.landing_file)
            .field("redirect_target", &self.redirect_target)
            .finish()
    }
}
