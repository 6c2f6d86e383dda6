//! Resource references
//!
//! A reference is built either from a short name plus the resolved scope or
//! by parsing a full relative name (`projects/.../spokes/...`) given directly
//! on the command line.

use std::fmt;

use crate::error::{CoreError, Result};
use crate::scope::{LocationFlags, RegionFlags, ScopeResolver, non_empty};

/// `projects/{project}/locations/{location}/clusters/{cluster}/nodePools/{node_pool}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePoolRef {
    project: String,
    location: String,
    cluster: String,
    node_pool: String,
}

impl NodePoolRef {
    pub fn new(project: &str, location: &str, cluster: &str, node_pool: &str) -> Result<Self> {
        Ok(Self {
            project: segment("project", project)?,
            location: segment("location", location)?,
            cluster: segment("cluster", cluster)?,
            node_pool: segment("node pool", node_pool)?,
        })
    }

    /// Build from the positional name, falling back to the resolver for scope
    pub fn resolve(
        name: &str,
        cluster: Option<&str>,
        location: &LocationFlags,
        resolver: &ScopeResolver,
    ) -> Result<Self> {
        if name.starts_with("projects/") {
            let pool = Self::parse(name)?;
            check_flag("--cluster", cluster, &pool.cluster, name)?;
            check_flag("--location", location.location.as_deref(), &pool.location, name)?;
            check_flag("--zone", location.zone.as_deref(), &pool.location, name)?;
            check_flag("--region", location.region.as_deref(), &pool.location, name)?;
            return Ok(pool);
        }
        let project = resolver.project()?;
        let location = resolver.location(location)?;
        let cluster = resolver.cluster(cluster)?;
        Self::new(&project, &location, &cluster, name)
    }

    pub fn parse(relative_name: &str) -> Result<Self> {
        match relative_name.split('/').collect::<Vec<_>>().as_slice() {
            ["projects", project, "locations", location, "clusters", cluster, "nodePools", node_pool] => {
                Self::new(project, location, cluster, node_pool)
            }
            _ => Err(CoreError::InvalidArgument(format!(
                "Invalid node pool name '{}': expected \
                 projects/PROJECT/locations/LOCATION/clusters/CLUSTER/nodePools/NAME",
                relative_name
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.node_pool
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn relative_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/clusters/{}/nodePools/{}",
            self.project, self.location, self.cluster, self.node_pool
        )
    }
}

impl fmt::Display for NodePoolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_name())
    }
}

/// `projects/{project}/locations/{region}/spokes/{spoke}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokeRef {
    project: String,
    region: String,
    spoke: String,
}

impl SpokeRef {
    pub fn new(project: &str, region: &str, spoke: &str) -> Result<Self> {
        Ok(Self {
            project: segment("project", project)?,
            region: segment("region", region)?,
            spoke: segment("spoke", spoke)?,
        })
    }

    pub fn resolve(name: &str, region: &RegionFlags, resolver: &ScopeResolver) -> Result<Self> {
        if name.starts_with("projects/") {
            let spoke = Self::parse(name)?;
            let flag = if region.global {
                Some("global")
            } else {
                region.region.as_deref()
            };
            check_flag("--region", flag, &spoke.region, name)?;
            return Ok(spoke);
        }
        let project = resolver.project()?;
        let region = resolver.region(region)?;
        Self::new(&project, &region, name)
    }

    pub fn parse(relative_name: &str) -> Result<Self> {
        match relative_name.split('/').collect::<Vec<_>>().as_slice() {
            ["projects", project, "locations", region, "spokes", spoke] => {
                Self::new(project, region, spoke)
            }
            _ => Err(CoreError::InvalidArgument(format!(
                "Invalid spoke name '{}': expected projects/PROJECT/locations/REGION/spokes/NAME",
                relative_name
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.spoke
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn relative_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/spokes/{}",
            self.project, self.region, self.spoke
        )
    }
}

impl fmt::Display for SpokeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_name())
    }
}

/// An explicit scope flag must agree with the full name it accompanies
fn check_flag(flag: &str, given: Option<&str>, parsed: &str, name: &str) -> Result<()> {
    match non_empty(given) {
        Some(value) if value != parsed => Err(CoreError::InvalidArgument(format!(
            "{} '{}' conflicts with '{}' in resource name '{}'",
            flag, value, parsed, name
        ))),
        _ => Ok(()),
    }
}

fn segment(kind: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CoreError::InvalidArgument(format!("{} must not be empty", kind)));
    }
    if value.contains('/') {
        return Err(CoreError::InvalidArgument(format!(
            "{} '{}' must not contain '/'",
            kind, value
        )));
    }
    Ok(value.to_string())
}
