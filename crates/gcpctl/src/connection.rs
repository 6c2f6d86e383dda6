//! Connection management: turns config, profile and flags into API clients

use std::path::PathBuf;

use gcpctl_core::connectivity::HttpConnectivityClient;
use gcpctl_core::container::HttpContainerClient;
use gcpctl_core::http::ApiTransport;
use gcpctl_core::{ApiSettings, ApiTrack, Config, PollSettings, Profile, ScopeResolver};
use tracing::{debug, info, trace};

use crate::error::Result as CliResult;

const ACCESS_TOKEN_ENV: &str = "GCPCTL_ACCESS_TOKEN";
const CONTAINER_ENDPOINT_ENV: &str = "GCPCTL_CONTAINER_ENDPOINT";
const NETWORK_CONNECTIVITY_ENDPOINT_ENV: &str = "GCPCTL_NETWORK_CONNECTIVITY_ENDPOINT";

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

/// Everything a command needs, resolved once per invocation
#[derive(Debug, Clone)]
pub struct Session {
    pub settings: ApiSettings,
    pub resolver: ScopeResolver,
    pub poll: PollSettings,
    transport: ApiTransport,
}

impl Session {
    pub fn container_client(&self) -> HttpContainerClient {
        HttpContainerClient::new(self.transport.clone(), self.settings.container.clone())
    }

    pub fn connectivity_client(&self) -> HttpConnectivityClient {
        HttpConnectivityClient::new(
            self.transport.clone(),
            self.settings.network_connectivity.clone(),
        )
    }
}

impl ConnectionManager {
    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// When --config-file is explicitly specified, environment variables are
    /// ignored so the file is the only source of credentials and endpoints.
    fn use_env_vars(&self) -> bool {
        self.config_path.is_none()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        if !self.use_env_vars() {
            return None;
        }
        let value = std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        if value.is_some() {
            debug!("Found {} environment variable", key);
        }
        value
    }

    /// Active profile with environment overrides applied
    pub fn resolve_profile(&self, profile_name: Option<&str>) -> CliResult<Profile> {
        trace!("Profile name: {:?}", profile_name);
        if let Some(name) = self.config.resolve_profile(profile_name)? {
            info!("Using profile: {}", name);
        } else {
            debug!("No profiles configured, using an empty profile");
        }

        let mut profile = self.config.active_profile(profile_name)?;

        if !self.use_env_vars() {
            info!("--config-file specified explicitly, ignoring environment variables");
        }
        if let Some(token) = self.env_var(ACCESS_TOKEN_ENV) {
            profile.access_token = Some(token);
        }
        if let Some(url) = self.env_var(CONTAINER_ENDPOINT_ENV) {
            profile.endpoints.container = Some(url);
        }
        if let Some(url) = self.env_var(NETWORK_CONNECTIVITY_ENDPOINT_ENV) {
            profile.endpoints.network_connectivity = Some(url);
        }

        Ok(profile)
    }

    /// Build the per-invocation [`Session`]
    ///
    /// Flag values win over the profile: `--project` replaces the default
    /// project and `--api-track` the profile's track.
    pub fn session(
        &self,
        profile_name: Option<&str>,
        project: Option<String>,
        api_track: Option<ApiTrack>,
    ) -> CliResult<Session> {
        let profile = self.resolve_profile(profile_name)?;

        let track = api_track.unwrap_or(profile.api_track);
        let settings = ApiSettings::resolve(track, &profile.endpoints)?;
        debug!(
            "API track {}: container {} ({}), network connectivity {} ({})",
            track,
            settings.container.base_url(),
            settings.container.version(),
            settings.network_connectivity.base_url(),
            settings.network_connectivity.version()
        );

        if profile.access_token.is_none() {
            debug!("No access token configured, requests will be unauthenticated");
        }
        let transport = ApiTransport::new(profile.access_token.clone())?;
        let resolver = ScopeResolver::new(profile.scope_defaults()).with_project(project);

        Ok(Session {
            settings,
            resolver,
            poll: PollSettings::from(&profile.polling),
            transport,
        })
    }
}
