pub mod adapter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use adapter::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Company {
    #[default]
    Apple,
    Microsoft,
    Amazon,
    Google,
    Meta,
}

impl Company {
    pub const ALL: [Company; 5] = [
        Company::Apple,
        Company::Microsoft,
        Company::Amazon,
        Company::Google,
        Company::Meta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Company::Apple => "Apple",
            Company::Microsoft => "Microsoft",
            Company::Amazon => "Amazon",
            Company::Google => "Google",
            Company::Meta => "Meta",
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown company: {0:?}")]
pub struct UnknownCompany(pub String);

impl FromStr for Company {
    type Err = UnknownCompany;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Company::ALL
            .iter()
            .copied()
            .find(|company| company.as_str() == s)
            .ok_or_else(|| UnknownCompany(s.to_string()))
    }
}

/// One daily price row as delivered by a provider.
///
/// Every field stays a string; parsing happens when a chart is built, so a
/// malformed price surfaces there as `NaN` instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Open")]
    pub open: String,
    #[serde(rename = "Close")]
    pub close: String,
}

impl RawRecord {
    pub fn new(
        date: impl Into<String>,
        company: impl Into<String>,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            company: company.into(),
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn is_company(&self, company: Company) -> bool {
        self.company == company.as_str()
    }
}
