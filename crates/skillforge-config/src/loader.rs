// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based layered config loading.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/skillforge/skillforge.toml`
//! 3. `~/.config/skillforge/skillforge.toml`
//! 4. `./skillforge.toml`
//! 5. `SKILLFORGE_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SkillforgeConfig;

/// Top-level sections an env var may address. `databases` is a free-form
/// map, so `SKILLFORGE_DATABASES_SHOP` becomes `databases.shop`.
const ENV_SECTIONS: &[&str] = &["log", "storage", "databases", "sql", "capabilities"];

/// Config files of the hierarchy, lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/skillforge/skillforge.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("skillforge").join("skillforge.toml"));
    }
    paths.push(PathBuf::from("skillforge.toml"));
    paths
}

/// Build the full Figment before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(SkillforgeConfig::default()));
    for path in config_file_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<SkillforgeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SkillforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SkillforgeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<SkillforgeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SkillforgeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Env provider mapping `SKILLFORGE_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `SKILLFORGE_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
fn env_provider() -> Env {
    Env::prefixed("SKILLFORGE_").map(|key| env_key_to_path(key.as_str()).into())
}

pub(crate) fn env_key_to_path(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
