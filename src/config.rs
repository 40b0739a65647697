use crate::error::{ConfigureError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

#[derive(Debug, Deserialize)]
pub struct Toolchain {
    pub cflags: String,
    pub debug_cflags: String,
    pub big_endian_define: String,
    pub release_ldflags: String,
    pub debug_ldflags: String,
    pub ldlibs: String,
}

#[derive(Debug, Deserialize)]
pub struct PlatformEntry {
    pub units: Vec<String>,
    #[serde(default)]
    pub defines: Vec<String>,
}

/// Static tables describing the kaplar project: units, headers and toolchain.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub entry_point: String,
    pub local_entry_point: String,
    pub source_suffix: String,
    pub object_suffix: String,
    pub headers: Vec<String>,
    pub common: Vec<String>,
    pub toolchain: Toolchain,
    pub compilers: BTreeMap<String, String>,
    pub platforms: BTreeMap<String, PlatformEntry>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.common.is_empty() {
            return Err(ConfigureError::EmptyCatalog);
        }
        let platform_units = self.platforms.values().flat_map(|p| p.units.iter());
        for unit in self.common.iter().chain(platform_units) {
            if unit.len() <= self.object_suffix.len() || !unit.ends_with(&self.object_suffix) {
                return Err(ConfigureError::InvalidUnit {
                    unit: unit.clone(),
                    suffix: self.object_suffix.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn platform(&self, name: &str) -> Result<&PlatformEntry> {
        self.platforms
            .get(name)
            .ok_or_else(|| ConfigureError::UnknownPlatform(name.to_string()))
    }

    pub fn compiler(&self, name: &str) -> Result<&str> {
        self.compilers
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ConfigureError::UnknownCompiler(name.to_string()))
    }
}
