//! Genesys Cloud regions and their base URLs
//!
//! Source: <https://developer.genesys.cloud/platform/api/>

use gc_validator_gen_common::{GeneratorError, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A Genesys Cloud deployment region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// US East (Virginia)
    UsEast1,
    /// US East 2 (Ohio)
    UsEast2,
    /// US West (Oregon)
    UsWest2,
    /// Canada (Central)
    CaCentral1,
    /// Europe (Ireland)
    EuWest1,
    /// Europe (London)
    EuWest2,
    /// Europe (Frankfurt)
    EuCentral1,
    /// Europe (Zurich)
    EuCentral2,
    /// Asia Pacific (Mumbai)
    ApSouth1,
    /// Asia Pacific (Tokyo)
    ApNortheast1,
    /// Asia Pacific (Seoul)
    ApNortheast2,
    /// Asia Pacific (Osaka)
    ApNortheast3,
    /// Asia Pacific (Sydney)
    ApSoutheast2,
    /// South America (São Paulo)
    SaEast1,
    /// Middle East (UAE)
    MeCentral1,
}

/// Base URLs of a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionUrls {
    /// API server
    pub api: Url,
    /// Web apps
    pub apps: Url,
    /// Auth server
    pub login: Url,
}

impl Region {
    pub const ALL: [Region; 15] = [
        Region::UsEast1,
        Region::UsEast2,
        Region::UsWest2,
        Region::CaCentral1,
        Region::EuWest1,
        Region::EuWest2,
        Region::EuCentral1,
        Region::EuCentral2,
        Region::ApSouth1,
        Region::ApNortheast1,
        Region::ApNortheast2,
        Region::ApNortheast3,
        Region::ApSoutheast2,
        Region::SaEast1,
        Region::MeCentral1,
    ];

    /// Region code, e.g. `us-east-1`
    pub fn code(&self) -> &'static str {
        match self {
            Region::UsEast1 => "us-east-1",
            Region::UsEast2 => "us-east-2",
            Region::UsWest2 => "us-west-2",
            Region::CaCentral1 => "ca-central-1",
            Region::EuWest1 => "eu-west-1",
            Region::EuWest2 => "eu-west-2",
            Region::EuCentral1 => "eu-central-1",
            Region::EuCentral2 => "eu-central-2",
            Region::ApSouth1 => "ap-south-1",
            Region::ApNortheast1 => "ap-northeast-1",
            Region::ApNortheast2 => "ap-northeast-2",
            Region::ApNortheast3 => "ap-northeast-3",
            Region::ApSoutheast2 => "ap-southeast-2",
            Region::SaEast1 => "sa-east-1",
            Region::MeCentral1 => "me-central-1",
        }
    }

    /// Domain name the region is served from
    pub fn domain(&self) -> &'static str {
        match self {
            Region::UsEast1 => "mypurecloud.com",
            Region::UsEast2 => "use2.us-gov-pure.cloud",
            Region::UsWest2 => "usw2.pure.cloud",
            Region::CaCentral1 => "cac1.pure.cloud",
            Region::EuWest1 => "mypurecloud.ie",
            Region::EuWest2 => "euw2.pure.cloud",
            Region::EuCentral1 => "mypurecloud.de",
            Region::EuCentral2 => "euc2.pure.cloud",
            Region::ApSouth1 => "aps1.pure.cloud",
            Region::ApNortheast1 => "mypurecloud.jp",
            Region::ApNortheast2 => "apne2.pure.cloud",
            Region::ApNortheast3 => "apne3.pure.cloud",
            Region::ApSoutheast2 => "mypurecloud.com.au",
            Region::SaEast1 => "sae1.pure.cloud",
            Region::MeCentral1 => "mec1.pure.cloud",
        }
    }

    /// API, apps and login URLs for this region
    pub fn urls(&self) -> Result<RegionUrls> {
        Ok(RegionUrls {
            api: self.base_url("api")?,
            apps: self.base_url("apps")?,
            login: self.base_url("login")?,
        })
    }

    fn base_url(&self, host: &str) -> Result<Url> {
        let raw = format!("https://{}.{}/", host, self.domain());
        Url::parse(&raw).map_err(|e| GeneratorError::Parse(format!("Invalid URL {}: {}", raw, e)))
    }
}

impl FromStr for Region {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|region| region.code() == code)
            .ok_or_else(|| GeneratorError::RegionInvalid(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
