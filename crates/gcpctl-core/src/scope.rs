//! Scope resolution: project, location, region and cluster
//!
//! Explicit flags win over profile defaults. Anything that cannot be resolved
//! is reported as [`CoreError::InvalidArgument`] before a request is made.

use crate::error::{CoreError, Result};

/// Ambient defaults, usually taken from the active profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeDefaults {
    pub project: Option<String>,
    pub location: Option<String>,
    pub zone: Option<String>,
    pub region: Option<String>,
    pub cluster: Option<String>,
}

/// Mutually exclusive cluster location flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFlags {
    pub location: Option<String>,
    pub zone: Option<String>,
    pub region: Option<String>,
}

/// Region flags for regional resources; `--global` selects the `global` location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionFlags {
    pub region: Option<String>,
    pub global: bool,
}

/// Resolves scope qualifiers against flags and defaults
#[derive(Debug, Clone, Default)]
pub struct ScopeResolver {
    defaults: ScopeDefaults,
}

impl ScopeResolver {
    pub fn new(defaults: ScopeDefaults) -> Self {
        Self { defaults }
    }

    /// Override the default project (e.g. from `--project`)
    pub fn with_project(mut self, project: Option<String>) -> Self {
        if project.is_some() {
            self.defaults.project = project;
        }
        self
    }

    pub fn defaults(&self) -> &ScopeDefaults {
        &self.defaults
    }

    pub fn project(&self) -> Result<String> {
        non_empty(self.defaults.project.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::InvalidArgument(
                    "The required property [project] is not currently set. \
                     Use --project or set `project` in your profile."
                        .to_string(),
                )
            })
    }

    /// Cluster location: `--location`, `--zone`, `--region`, then profile defaults
    pub fn location(&self, flags: &LocationFlags) -> Result<String> {
        let explicit: Vec<&str> = [&flags.location, &flags.zone, &flags.region]
            .into_iter()
            .filter_map(|v| non_empty(v.as_deref()))
            .collect();

        match explicit.as_slice() {
            [single] => return Ok(single.to_string()),
            [] => {}
            _ => {
                return Err(CoreError::InvalidArgument(
                    "At most one of [--location, --zone, --region] may be specified.".to_string(),
                ));
            }
        }

        non_empty(self.defaults.location.as_deref())
            .or_else(|| non_empty(self.defaults.zone.as_deref()))
            .or_else(|| non_empty(self.defaults.region.as_deref()))
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::InvalidArgument(
                    "One of [--location, --zone, --region] must be supplied.".to_string(),
                )
            })
    }

    /// Region for regional resources: `--region`, `--global`, then the profile region
    pub fn region(&self, flags: &RegionFlags) -> Result<String> {
        match (non_empty(flags.region.as_deref()), flags.global) {
            (Some(_), true) => Err(CoreError::InvalidArgument(
                "--region and --global cannot be used together.".to_string(),
            )),
            (Some(region), false) => Ok(region.to_string()),
            (None, true) => Ok("global".to_string()),
            (None, false) => non_empty(self.defaults.region.as_deref())
                .map(str::to_string)
                .ok_or_else(|| {
                    CoreError::InvalidArgument(
                        "One of [--region, --global] must be supplied.".to_string(),
                    )
                }),
        }
    }

    pub fn cluster(&self, explicit: Option<&str>) -> Result<String> {
        non_empty(explicit)
            .or_else(|| non_empty(self.defaults.cluster.as_deref()))
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::InvalidArgument(
                    "Cluster must be specified with --cluster or set as `cluster` in your profile."
                        .to_string(),
                )
            })
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> ScopeResolver {
        ScopeResolver::new(ScopeDefaults {
            project: Some("profile-project".to_string()),
            location: None,
            zone: Some("us-east1-b".to_string()),
            region: Some("us-east1".to_string()),
            cluster: Some("profile-cluster".to_string()),
        })
    }

    #[test]
    fn test_project_override() {
        let r = resolver().with_project(Some("flag-project".to_string()));
        assert_eq!(r.project().unwrap(), "flag-project");
        let r = resolver().with_project(None);
        assert_eq!(r.project().unwrap(), "profile-project");
    }

    #[test]
    fn test_project_is_trimmed_and_owned() {
        let r = ScopeResolver::default().with_project(Some("  my-project ".to_string()));
        let project: String = r.project().unwrap();
        assert_eq!(project, "my-project");
        let blank = ScopeResolver::default().with_project(Some("  ".to_string()));
        assert!(blank.project().is_err());
    }

    #[test]
    fn test_missing_project() {
        let err = ScopeResolver::default().project().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("[project]"));
    }

    #[test]
    fn test_location_prefers_flag() {
        let flags = LocationFlags {
            region: Some("europe-west4".to_string()),
            ..Default::default()
        };
        assert_eq!(resolver().location(&flags).unwrap(), "europe-west4");
    }

    #[test]
    fn test_location_falls_back_to_profile_zone() {
        assert_eq!(
            resolver().location(&LocationFlags::default()).unwrap(),
            "us-east1-b"
        );
    }

    #[test]
    fn test_location_conflicting_flags() {
        let flags = LocationFlags {
            location: Some("us-central1".to_string()),
            zone: Some("us-central1-a".to_string()),
            region: None,
        };
        assert!(resolver().location(&flags).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_location_unresolvable() {
        let err = ScopeResolver::default()
            .location(&LocationFlags::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: One of [--location, --zone, --region] must be supplied."
        );
    }

    #[test]
    fn test_region_variants() {
        let r = resolver();
        let explicit = RegionFlags {
            region: Some("us-central1".to_string()),
            global: false,
        };
        assert_eq!(r.region(&explicit).unwrap(), "us-central1");

        let global = RegionFlags {
            region: None,
            global: true,
        };
        assert_eq!(r.region(&global).unwrap(), "global");

        assert_eq!(r.region(&RegionFlags::default()).unwrap(), "us-east1");
        assert!(
            ScopeResolver::default()
                .region(&RegionFlags::default())
                .is_err()
        );
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let flags = RegionFlags {
            region: Some("   ".to_string()),
            global: false,
        };
        assert_eq!(resolver().region(&flags).unwrap(), "us-east1");
        assert_eq!(resolver().cluster(Some("")).unwrap(), "profile-cluster");
    }
}
