//! Where config layers live and how a single layer is read.

use super::{ConfigLayer, ConfigLayerSource, LayeredConfigOptions, schema};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name looked up in every local layer.
pub(super) const CONFIG_FILE_NAME: &str = "reelshelf.json5";
/// Directory under the home directory holding the user layer.
const USER_CONFIG_DIR: &str = ".reelshelf";

/// A layer location still to be read.
#[derive(Debug, Clone)]
pub(super) struct LayerLocation {
    pub source: ConfigLayerSource,
    pub path: PathBuf,
    /// Required layers fail the load when absent.
    pub required: bool,
}

/// A layer read from disk and schema-checked.
#[derive(Debug, Clone)]
pub(super) struct LoadedLayer {
    pub meta: ConfigLayer,
    pub value: Value,
}

/// `~/.reelshelf/reelshelf.json5`, when a home directory is known.
pub(super) fn user_config_path() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(dirs.home_dir().join(USER_CONFIG_DIR).join(CONFIG_FILE_NAME))
}

/// Layer locations in precedence order (lowest first).
///
/// A file reachable through more than one optional location is only listed
/// once, at its lowest-precedence position.
pub(super) fn layer_locations(options: &LayeredConfigOptions, cwd: &Path) -> Vec<LayerLocation> {
    let mut optional = Vec::new();
    if let Some(path) = &options.user_config_path {
        optional.push((ConfigLayerSource::User, path.clone()));
    }
    if let Some(root) = project_root(cwd, &options.project_root_markers) {
        debug!("project root found (root={})", root.display());
        optional.push((ConfigLayerSource::Project, root.join(CONFIG_FILE_NAME)));
    }
    optional.push((ConfigLayerSource::Cwd, cwd.join(CONFIG_FILE_NAME)));

    let mut seen = HashSet::new();
    let mut locations: Vec<LayerLocation> = optional
        .into_iter()
        .filter(|(source, path)| {
            let fresh = seen.insert(canonical_or_self(path));
            if !fresh {
                debug!(
                    "duplicate config layer skipped (source={:?}, path={})",
                    source,
                    path.display()
                );
            }
            fresh
        })
        .map(|(source, path)| LayerLocation {
            source,
            path,
            required: false,
        })
        .collect();
    locations.extend(options.runtime_paths.iter().map(|path| LayerLocation {
        source: ConfigLayerSource::Runtime,
        path: path.clone(),
        required: true,
    }));
    locations
}

/// Read, parse and schema-check one layer. Absent optional layers yield `None`.
pub(super) fn read_layer(location: &LayerLocation) -> Result<Option<LoadedLayer>, ConfigError> {
    let contents = match fs::read_to_string(&location.path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            if location.required {
                return Err(ConfigError::MissingLayer(location.path.clone()));
            }
            debug!(
                "config layer absent (source={:?}, path={})",
                location.source,
                location.path.display()
            );
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: location.path.clone(),
                source,
            });
        }
    };
    let origin = origin_label(location.source, &location.path);
    debug!("config layer read (origin={origin}, len={})", contents.len());
    let value: Value = json5::from_str(&contents).map_err(|source| ConfigError::Parse {
        origin: origin.clone(),
        source,
    })?;
    schema::validate_layer_schema(&value, &origin)?;
    Ok(Some(LoadedLayer {
        meta: ConfigLayer {
            source: location.source,
            path: location.path.clone(),
        },
        value,
    }))
}

/// Canonical form of the working directory; a missing directory is kept as
/// given so a fresh checkout path still resolves layers.
pub(super) fn resolve_cwd(cwd: &Path) -> Result<PathBuf, ConfigError> {
    match cwd.canonicalize() {
        Ok(path) => Ok(path),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(cwd.to_path_buf()),
        Err(source) => Err(ConfigError::Read {
            path: cwd.to_path_buf(),
            source,
        }),
    }
}

/// Label used in error messages, e.g. `cwd(/work/reelshelf.json5)`.
fn origin_label(source: ConfigLayerSource, path: &Path) -> String {
    let name = match source {
        ConfigLayerSource::User => "user",
        ConfigLayerSource::Project => "project",
        ConfigLayerSource::Cwd => "cwd",
        ConfigLayerSource::Runtime => "runtime",
    };
    format!("{name}({})", path.display())
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Nearest ancestor of `cwd` (inclusive) containing one of `markers`.
fn project_root(cwd: &Path, markers: &[String]) -> Option<PathBuf> {
    cwd.ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}
