//! Global vs regional addressing of backend services.

use std::fmt;

/// Where a backend service lives.
///
/// Global services are addressed as `projects/{p}/global/backendServices/{name}`,
/// regional ones as `projects/{p}/regions/{r}/backendServices/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Regional(String),
}

impl Scope {
    /// Normalize an aggregated-list scope key (`"regions/europe-west1"`, `"global"`).
    ///
    /// Only the last path segment is significant.
    pub fn from_scope_key(key: &str) -> Self {
        let last = key.rsplit('/').next().unwrap_or(key);
        Self::from_region(last)
    }

    /// Parse a region as given on the command line.
    pub fn from_region(region: &str) -> Self {
        if region == "global" {
            Scope::Global
        } else {
            Scope::Regional(region.to_string())
        }
    }

    /// Region string as reported to the monitoring system.
    pub fn region(&self) -> &str {
        match self {
            Scope::Global => "global",
            Scope::Regional(region) => region,
        }
    }

    /// URL path segments preceding `backendServices`.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Scope::Global => vec!["global"],
            Scope::Regional(region) => vec!["regions", region.as_str()],
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.region())
    }
}
