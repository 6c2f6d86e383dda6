//! API track and endpoint selection
//!
//! The release track decides which API version every request uses. It is
//! resolved exactly once into an [`ApiSettings`] value, which is then handed
//! to the clients; nothing downstream branches on the track again.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::config::{ConfigError, EndpointOverrides};

pub const DEFAULT_CONTAINER_ENDPOINT: &str = "https://container.googleapis.com";
pub const DEFAULT_NETWORK_CONNECTIVITY_ENDPOINT: &str =
    "https://networkconnectivity.googleapis.com";

/// Release track selecting API versions
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ApiTrack {
    #[default]
    Ga,
    Beta,
    Alpha,
}

impl ApiTrack {
    pub fn container_version(self) -> &'static str {
        match self {
            ApiTrack::Ga => "v1",
            ApiTrack::Beta => "v1beta1",
            ApiTrack::Alpha => "v1alpha1",
        }
    }

    pub fn network_connectivity_version(self) -> &'static str {
        match self {
            ApiTrack::Ga => "v1",
            ApiTrack::Beta => "v1beta",
            ApiTrack::Alpha => "v1alpha1",
        }
    }
}

impl fmt::Display for ApiTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiTrack::Ga => write!(f, "ga"),
            ApiTrack::Beta => write!(f, "beta"),
            ApiTrack::Alpha => write!(f, "alpha"),
        }
    }
}

/// Base URL plus API version of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    base_url: Url,
    version: String,
}

impl ServiceEndpoint {
    pub fn new(base_url: &str, version: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidEndpoint {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            version: version.into(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL for `relative_name`, optionally followed by a `:customMethod` suffix
    pub fn url_for(&self, relative_name: &str, custom_method: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        let mut path = format!("{}/{}/{}", base_path, self.version, relative_name);
        if let Some(method) = custom_method {
            path.push(':');
            path.push_str(method);
        }
        url.set_path(&path);
        url
    }
}

/// Endpoints for every service, resolved from the track and overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub track: ApiTrack,
    pub container: ServiceEndpoint,
    pub network_connectivity: ServiceEndpoint,
}

impl ApiSettings {
    pub fn resolve(track: ApiTrack, overrides: &EndpointOverrides) -> Result<Self, ConfigError> {
        let container = ServiceEndpoint::new(
            overrides
                .container
                .as_deref()
                .unwrap_or(DEFAULT_CONTAINER_ENDPOINT),
            track.container_version(),
        )?;
        let network_connectivity = ServiceEndpoint::new(
            overrides
                .network_connectivity
                .as_deref()
                .unwrap_or(DEFAULT_NETWORK_CONNECTIVITY_ENDPOINT),
            track.network_connectivity_version(),
        )?;

        Ok(Self {
            track,
            container,
            network_connectivity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_per_track() {
        assert_eq!(ApiTrack::Ga.container_version(), "v1");
        assert_eq!(ApiTrack::Beta.container_version(), "v1beta1");
        assert_eq!(ApiTrack::Alpha.network_connectivity_version(), "v1alpha1");
        assert_eq!(ApiTrack::Beta.network_connectivity_version(), "v1beta");
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = ApiSettings::resolve(ApiTrack::Ga, &EndpointOverrides::default()).unwrap();
        assert_eq!(
            settings.container.base_url().as_str(),
            "https://container.googleapis.com/"
        );
        assert_eq!(settings.network_connectivity.version(), "v1");
    }

    #[test]
    fn test_url_for_custom_method() {
        let endpoint =
            ServiceEndpoint::new("https://networkconnectivity.googleapis.com", "v1").unwrap();
        let url = endpoint.url_for(
            "projects/p/locations/us-central1/spokes/myspoke",
            Some("deactivate"),
        );
        assert_eq!(
            url.as_str(),
            "https://networkconnectivity.googleapis.com/v1/projects/p/locations/us-central1/spokes/myspoke:deactivate"
        );
    }

    #[test]
    fn test_url_for_keeps_base_path() {
        let endpoint = ServiceEndpoint::new("http://localhost:9000/proxy/", "v1beta1").unwrap();
        let url = endpoint.url_for("projects/p/locations/l/operations/op", None);
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/proxy/v1beta1/projects/p/locations/l/operations/op"
        );
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = EndpointOverrides {
            container: Some("not a url".to_string()),
            network_connectivity: None,
        };
        let err = ApiSettings::resolve(ApiTrack::Ga, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_track_serde_lowercase() {
        let track: ApiTrack = serde_json::from_str("\"alpha\"").unwrap();
        assert_eq!(track, ApiTrack::Alpha);
        assert_eq!(track.to_string(), "alpha");
    }
}
