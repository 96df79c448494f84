//! Region access strategies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a host-managed region is made visible to the engine
///
/// `Pin` reads the host memory in place. It avoids a copy but the host may
/// stall unrelated work while the region is pinned, so nothing slow may run
/// during the pin. `Copy` always works and costs one copy of the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStrategy {
    #[default]
    Copy,
    Pin,
}

impl IngestStrategy {
    /// Map the boundary's `prefer_copy` flag onto a strategy
    pub fn from_prefer_copy(prefer_copy: bool) -> Self {
        if prefer_copy { Self::Copy } else { Self::Pin }
    }

    pub fn prefers_copy(self) -> bool {
        self == Self::Copy
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Pin => "pin",
        }
    }
}

impl fmt::Display for IngestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngestStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Ok(Self::Copy),
            "pin" => Ok(Self::Pin),
            other => Err(format!("unknown ingest strategy '{other}' (expected copy or pin)")),
        }
    }
}

/// How acquired region memory is handed back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// Write any changes back to the host region
    Commit,
    /// Drop the access without writing back
    Abort,
}
