/*
[INPUT]:  Known OVH-family API hosts and their versions
[OUTPUT]: Endpoint enum resolving to a base URL
[POS]:    Data layer - endpoint selection at client construction
[UPDATE]: When an API host or its latest version changes
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// API version shipped by every endpoint today
const LATEST_VERSION: &str = "1.0";

/// All the available API endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    #[default]
    #[serde(rename = "ovh-eu")]
    OvhEu,
    #[serde(rename = "ovh-ca")]
    OvhCa,
    #[serde(rename = "kimsufi-eu")]
    KimsufiEu,
    #[serde(rename = "kimsufi-ca")]
    KimsufiCa,
    #[serde(rename = "soyoustart-eu")]
    SoYouStartEu,
    #[serde(rename = "soyoustart-ca")]
    SoYouStartCa,
    #[serde(rename = "runabove")]
    Runabove,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::OvhEu,
        Endpoint::OvhCa,
        Endpoint::KimsufiEu,
        Endpoint::KimsufiCa,
        Endpoint::SoYouStartEu,
        Endpoint::SoYouStartCa,
        Endpoint::Runabove,
    ];

    /// Scheme and host, with trailing slash
    pub fn raw_value(self) -> &'static str {
        match self {
            Endpoint::OvhEu => "https://api.ovh.com/",
            Endpoint::OvhCa => "https://ca.api.ovh.com/",
            Endpoint::KimsufiEu => "https://eu.api.kimsufi.com/",
            Endpoint::KimsufiCa => "https://ca.api.kimsufi.com/",
            Endpoint::SoYouStartEu => "https://eu.api.soyoustart.com/",
            Endpoint::SoYouStartCa => "https://ca.api.soyoustart.com/",
            Endpoint::Runabove => "https://api.runabove.com/",
        }
    }

    /// Latest known version of this endpoint
    pub fn latest_version(self) -> &'static str {
        LATEST_VERSION
    }

    /// Base URL for the given version, e.g. `https://api.ovh.com/1.0`
    pub fn base_url(self, version: &str) -> String {
        format!("{}{}", self.raw_value(), version)
    }

    /// Short configuration name, e.g. `ovh-eu`
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::OvhEu => "ovh-eu",
            Endpoint::OvhCa => "ovh-ca",
            Endpoint::KimsufiEu => "kimsufi-eu",
            Endpoint::KimsufiCa => "kimsufi-ca",
            Endpoint::SoYouStartEu => "soyoustart-eu",
            Endpoint::SoYouStartCa => "soyoustart-ca",
            Endpoint::Runabove => "runabove",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Endpoint::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == wanted)
            .ok_or_else(|| format!("unknown endpoint '{s}'"))
    }
}
