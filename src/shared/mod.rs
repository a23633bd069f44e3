//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw strings the API uses, so they can be used directly in wire types
//! and configuration files.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::ConfigError;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for API asset identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── QuoteCurrency ───────────────────────────────────────────────────────────

/// Currency prices are denominated in. Always stored lowercase, which is how
/// the API keys its responses (`"usd"`, `"eur"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteCurrency(String);

impl QuoteCurrency {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(s.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QuoteCurrency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for QuoteCurrency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for QuoteCurrency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(QuoteCurrency::new(s))
    }
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// A tracked asset: API identifier plus the name shown on its price card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub name: String,
}

impl Asset {
    pub fn new(id: impl Into<AssetId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Asset whose display name is derived from its id (`"bitcoin"` → `"Bitcoin"`).
    pub fn from_id(id: impl Into<AssetId>) -> Self {
        let id = id.into();
        let name = capitalize(id.as_str());
        Self { id, name }
    }
}

/// Parses `id` or `id:Name`.
impl FromStr for Asset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (id, name) = match s.split_once(':') {
            Some((id, name)) => (id.trim(), Some(name.trim())),
            None => (s, None),
        };
        if id.is_empty() || id.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidAssetSpec(s.to_string()));
        }
        Ok(match name {
            Some(name) if !name.is_empty() => Asset::new(id, name),
            Some(_) => return Err(ConfigError::InvalidAssetSpec(s.to_string())),
            None => Asset::from_id(id),
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_serde_transparent() {
        let id: AssetId = serde_json::from_str(r#""bitcoin""#).unwrap();
        assert_eq!(id.as_str(), "bitcoin");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""bitcoin""#);
    }

    #[test]
    fn test_quote_currency_lowercased() {
        assert_eq!(QuoteCurrency::new("USD").as_str(), "usd");
        let q: QuoteCurrency = serde_json::from_str(r#"" Eur ""#).unwrap();
        assert_eq!(q.as_str(), "eur");
    }

    #[test]
    fn test_asset_parse_with_name() {
        let asset: Asset = "ethereum:Ether".parse().unwrap();
        assert_eq!(asset.id.as_str(), "ethereum");
        assert_eq!(asset.name, "Ether");
    }

    #[test]
    fn test_asset_parse_derives_name() {
        let asset: Asset = "bitcoin".parse().unwrap();
        assert_eq!(asset.name, "Bitcoin");
    }

    #[test]
    fn test_asset_parse_rejects_bad_specs() {
        assert!("".parse::<Asset>().is_err());
        assert!(":Bitcoin".parse::<Asset>().is_err());
        assert!("bitcoin:".parse::<Asset>().is_err());
        assert!("bit coin".parse::<Asset>().is_err());
    }
}
