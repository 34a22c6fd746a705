//! Per-item provider parameter bundle.
//!
//! Every resource spec carries its own bundle of region and credentials as a
//! `;`-separated list of `key=value` pairs:
//!
//! ```text
//! Region=ap-guangzhou;SecretID=AKIDxxxx;SecretKey=xxxx
//! ```
//!
//! The bundle is parsed once per item. Secret values never appear in `Debug`
//! or `Display` output.

use crate::error::PluginError;
use std::collections::BTreeMap;
use std::fmt;

pub const REGION_KEY: &str = "Region";
pub const SECRET_ID_KEY: &str = "SecretID";
pub const SECRET_KEY_KEY: &str = "SecretKey";

const REDACTED: &str = "******";

/// Parsed provider parameter bundle.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProviderParams {
    params: BTreeMap<String, String>,
}

impl ProviderParams {
    /// Parse a raw `key=value;key=value` bundle.
    ///
    /// Whitespace around each pair is trimmed and empty segments are skipped.
    /// A segment that is not exactly one `key=value` pair is rejected.
    pub fn parse(raw: &str) -> Result<Self, PluginError> {
        let mut params = BTreeMap::new();

        for (position, segment) in raw.split(';').enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let mut parts = segment.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.trim().is_empty() => {
                    params.insert(key.trim().to_string(), value.trim().to_string());
                }
                _ => {
                    return Err(PluginError::InvalidProviderParams(describe_illegal_segment(
                        position + 1,
                        segment,
                    )));
                }
            }
        }

        Ok(Self { params })
    }

    /// Get a raw parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a parameter that must be present and non-empty.
    pub fn require(&self, key: &str) -> Result<&str, PluginError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(PluginError::InvalidProviderParams(format!(
                "missing required key '{key}'"
            ))),
        }
    }

    /// The region the resource lives in.
    pub fn region(&self) -> Result<&str, PluginError> {
        self.require(REGION_KEY)
    }

    /// Resolve the region and access-key pair.
    pub fn credentials(&self) -> Result<Credentials, PluginError> {
        Ok(Credentials {
            region: self.region()?.to_string(),
            secret_id: self.require(SECRET_ID_KEY)?.to_string(),
            secret_key: self.require(SECRET_KEY_KEY)?.to_string(),
        })
    }

    /// Number of parsed parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the bundle is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Debug for ProviderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.params {
            if is_secret_key(key) {
                map.entry(key, &REDACTED);
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl fmt::Display for ProviderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.params {
            if !first {
                f.write_str(";")?;
            }
            first = false;
            let value = if is_secret_key(key) { REDACTED } else { value };
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Region plus access-key pair needed to reach the cloud API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub region: String,
    pub secret_id: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(
        region: impl Into<String>,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("region", &self.region)
            .field("secret_id", &REDACTED)
            .field("secret_key", &REDACTED)
            .finish()
    }
}

fn is_secret_key(key: &str) -> bool {
    key.to_ascii_lowercase().starts_with("secret")
}

/// Describe a malformed segment by position and key, never by value.
fn describe_illegal_segment(position: usize, segment: &str) -> String {
    match segment.split_once('=') {
        Some((key, _)) if !key.trim().is_empty() => format!(
            "illegal segment #{position} (key '{}'), expected key=value",
            key.trim()
        ),
        _ => format!("illegal segment #{position}, expected key=value"),
    }
}
