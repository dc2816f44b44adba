//! # OTMusic Configuration Module
//!
//! This module provides configuration management for OTMusic, including:
//! - Loading configuration from YAML files
//! - Merging with embedded default configuration
//! - Environment variable overrides
//! - Type-safe getters and setters for configuration values
//! - Thread-safe singleton access pattern
//!
//! ## Usage
//!
//! ```no_run
//! use otconfig::get_config;
//!
//! // Get the global configuration
//! let config = get_config();
//!
//! // Access configuration values
//! let (hl, gl) = config.get_locale();
//! let db_path = config.get_library_db_path()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::Path,
    sync::{Arc, Mutex},
};
use tracing::info;

// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("otmusic.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load OTMusic configuration"));
}

const ENV_CONFIG_DIR: &str = "OTMUSIC_CONFIG";
const ENV_PREFIX: &str = "OTMUSIC_CONFIG__";

// Default values for configuration
const DEFAULT_HL: &str = "en";
const DEFAULT_GL: &str = "US";
const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";
const DEFAULT_LOG_ENABLE_CONSOLE: bool = true;
const DEFAULT_LIBRARY_DIR: &str = "library";
const DEFAULT_LIBRARY_DB_FILE: &str = "otmusic.db";
const DEFAULT_SPONSORBLOCK_BASE_URL: &str = "https://sponsor.ajay.app";

/// Macro to generate getter/setter for usize values with default
macro_rules! impl_usize_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<usize> {
            match self.get_value($path)? {
                Value::Number(n) if n.is_i64() => Ok(n.as_i64().unwrap() as usize),
                Value::Number(n) if n.is_u64() => Ok(n.as_u64().unwrap() as usize),
                _ => Ok($default),
            }
        }

        pub fn $setter(&self, size: usize) -> Result<()> {
            let n = Number::from(size);
            self.set_value($path, Value::Number(n))
        }
    };
}

/// Macro to generate getter/setter for bool values with default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<bool> {
            match self.get_value($path)? {
                Value::Bool(b) => Ok(b),
                _ => Ok($default),
            }
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// Macro to generate getter/setter for string values with default
macro_rules! impl_string_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<String> {
            match self.get_value($path)? {
                Value::String(s) if !s.is_empty() => Ok(s),
                _ => Ok($default.to_string()),
            }
        }

        pub fn $setter(&self, value: String) -> Result<()> {
            self.set_value($path, Value::String(value))
        }
    };
}

/// Configuration manager for OTMusic
///
/// This structure manages the application configuration, including:
/// - Loading configuration from YAML files
/// - Merging with default configuration
/// - Handling environment variable overrides
/// - Providing typed getters/setters for configuration values
///
/// # Examples
///
/// ```no_run
/// use otconfig::get_config;
///
/// let config = get_config();
/// let (hl, gl) = config.get_locale();
/// println!("Locale: {}-{}", hl, gl);
/// ```
#[derive(Debug)]
pub struct Config {
    config_dir: String,
    path: String,
    data: Mutex<Value>,
}

// Implémentation manuelle de Clone
impl Clone for Config {
    fn clone(&self) -> Self {
        let data = self.data.lock().unwrap().clone();
        Self {
            config_dir: self.config_dir.clone(),
            path: self.path.clone(),
            data: Mutex::new(data),
        }
    }
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: &str) -> String {
        // 1. Try provided directory
        if !directory.is_empty() {
            return directory.to_string();
        }

        // 2. Try environment variable
        if let Ok(env_path) = env::var(ENV_CONFIG_DIR) {
            info!(env_var=ENV_CONFIG_DIR, path=%env_path, "Trying to load config from env");
            return env_path;
        }

        // 3. Try current directory
        if Path::new(".otmusic").exists() {
            return ".otmusic".to_string();
        }

        // 4. Try home directory
        if let Some(home) = home_dir() {
            let home_config = home.join(".otmusic");
            if home_config.exists() {
                return home_config.to_string_lossy().to_string();
            }
        }

        // Default fallback
        ".otmusic".to_string()
    }

    /// Validates and prepares a config directory
    fn validate_config_dir(path: &Path) -> Result<()> {
        // Create if doesn't exist
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        // Verify it's a directory
        if !path.is_dir() {
            return Err(anyhow!("The configured path is not a directory"));
        }

        // Test write permission
        let test_file = path.join(".write_test");
        fs::write(&test_file, b"test")?;
        fs::remove_file(&test_file)?;

        // Test read permission
        fs::read_dir(path)?;

        Ok(())
    }

    /// Determines and validates the configuration directory
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory` parameter if not empty
    /// 2. The `OTMUSIC_CONFIG` environment variable
    /// 3. `.otmusic` in the current directory
    /// 4. `.otmusic` in the user's home directory
    ///
    /// The directory is created if it doesn't exist, and validated for
    /// read/write permissions.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created or validated
    pub fn config_dir(directory: &str) -> String {
        let dir_path = Self::find_config_dir(directory);
        let path = Path::new(&dir_path);

        Self::validate_config_dir(path).expect("Cannot validate the configuration directory");

        dir_path
    }

    /// Loads the configuration from the specified directory
    ///
    /// This method:
    /// 1. Determines the configuration directory
    /// 2. Loads the default embedded configuration
    /// 3. Merges it with the external config.yaml file if present
    /// 4. Applies environment variable overrides
    /// 5. Saves the merged configuration
    ///
    /// # Arguments
    ///
    /// * `directory` - The directory containing the config.yaml file, or empty to use defaults
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the loaded `Config` or an error
    pub fn load_config(directory: &str) -> Result<Self> {
        let config_dir = Self::config_dir(directory);
        info!(config_dir=%config_dir, "Using config directory");

        let config_file_path = Path::new(&config_dir).join("config.yaml");
        let path = config_file_path.to_string_lossy().to_string();

        // Load the embedded default configuration
        let mut default_value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        // Try to load the external configuration file
        let yaml_data = if let Ok(data) = fs::read(&path) {
            info!(config_file=%path, "Loaded config file");
            data
        } else {
            info!(config_file=%path, "Config file not found, using default embedded config");
            DEFAULT_CONFIG.as_bytes().to_vec()
        };

        // Merge with the default configuration
        let external_value: Value = serde_yaml::from_slice(&yaml_data)?;
        merge_yaml(&mut default_value, &external_value);
        let mut config_value = Self::lower_keys_value(default_value);

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut config_value);

        let config = Config {
            config_dir,
            path,
            data: Mutex::new(config_value),
        };

        config.save()?;
        Ok(config)
    }

    /// Saves the current configuration to the config.yaml file
    pub fn save(&self) -> Result<()> {
        let data = self.data.lock().unwrap();
        let yaml = serde_yaml::to_string(&*data)?;
        fs::write(&self.path, yaml)?;
        Ok(())
    }

    /// Sets a configuration value at the specified path and saves it
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["locale", "hl"]`)
    /// * `value` - The YAML value to set
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        let mut data = self.data.lock().unwrap();
        Self::set_value_internal(&mut data, path, value.clone())?;
        drop(data);
        self.save()?;
        Ok(())
    }

    fn set_value_internal(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
        if path.is_empty() {
            *data = value;
            return Ok(());
        }
        if let Value::Mapping(map) = data {
            let key = path[0].to_lowercase();
            let key_value = Value::String(key.clone());
            if path.len() == 1 {
                map.insert(key_value, value);
            } else {
                let entry = map
                    .entry(key_value)
                    .or_insert(Value::Mapping(Mapping::new()));
                Self::set_value_internal(entry, &path[1..], value)?;
            }
            Ok(())
        } else {
            Err(anyhow!("Current node is not a map"))
        }
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["locale", "hl"]`)
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing the YAML value or an error if the path doesn't exist
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let data = self.data.lock().unwrap();
        Self::get_value_internal(&data, path)
    }

    fn get_value_internal(data: &Value, path: &[&str]) -> Result<Value> {
        let mut current = data;
        for (i, key) in path.iter().enumerate() {
            if let Value::Mapping(map) = current {
                let key = key.to_lowercase();

                if let Some(next) = map.get(&Value::String(key)) {
                    current = next;
                } else {
                    return Err(anyhow!("Path {} does not exist", path[..=i].join(".")));
                }
            } else {
                return Err(anyhow!("Path {} is not a Config", path[..i].join(".")));
            }
        }
        Ok(current.clone())
    }

    fn apply_env_overrides(config: &mut Value) {
        for (key, value) in env::vars() {
            if key.starts_with(ENV_PREFIX) {
                let key_path = key
                    .trim_start_matches(ENV_PREFIX)
                    .split("__")
                    .collect::<Vec<_>>();
                let yaml_value = Self::convert_env_value(&value);
                let _ = Self::set_value_internal(config, &key_path, yaml_value);
            }
        }
    }

    fn convert_env_value(value: &str) -> Value {
        if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
            return parsed;
        }
        Value::String(value.to_string())
    }

    fn lower_keys_value(value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut new_map = Mapping::new();
                for (k, v) in map {
                    if let Value::String(s) = k {
                        let new_key = Value::String(s.to_lowercase());
                        let new_val = Self::lower_keys_value(v);
                        new_map.insert(new_key, new_val);
                    } else {
                        new_map.insert(k, Self::lower_keys_value(v));
                    }
                }
                Value::Mapping(new_map)
            }
            Value::Sequence(seq) => {
                Value::Sequence(seq.into_iter().map(Self::lower_keys_value).collect())
            }
            _ => value,
        }
    }

    /// Resolves a relative or absolute path and creates the directory if needed
    fn resolve_and_create_dir(&self, dir_path: &str) -> Result<String> {
        let path = Path::new(dir_path);

        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            // Relative path: resolve against config_dir
            Path::new(&self.config_dir).join(path)
        };

        if !absolute_path.exists() {
            fs::create_dir_all(&absolute_path)?;
            info!(directory=%absolute_path.display(), "Created managed directory");
        }

        Ok(absolute_path.to_string_lossy().to_string())
    }

    /// Gets a directory managed by the configuration
    ///
    /// The directory can be absolute or relative to the configuration
    /// directory. It is created if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path in the configuration tree (e.g., `&["library", "directory"]`)
    /// * `default` - Default directory name if not configured
    pub fn get_managed_dir(&self, path: &[&str], default: &str) -> Result<String> {
        let dir_path = match self.get_value(path) {
            Ok(Value::String(s)) => s,
            _ => {
                self.set_managed_dir(path, default.to_string())?;
                default.to_string()
            }
        };
        self.resolve_and_create_dir(&dir_path)
    }

    /// Sets a directory managed by the configuration
    pub fn set_managed_dir(&self, path: &[&str], directory: String) -> Result<()> {
        self.set_value(path, Value::String(directory))
    }

    // ============ Locale ============

    /// Gets the content locale as an (hl, gl) pair
    ///
    /// `hl` is the language code (e.g. "en"), `gl` the country code
    /// (e.g. "US"). Defaults to en-US when not configured.
    pub fn get_locale(&self) -> (String, String) {
        let hl = match self.get_value(&["locale", "hl"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_HL.to_string(),
        };
        let gl = match self.get_value(&["locale", "gl"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_GL.to_string(),
        };
        (hl, gl)
    }

    /// Sets the content locale
    pub fn set_locale(&self, hl: String, gl: String) -> Result<()> {
        self.set_value(&["locale", "hl"], Value::String(hl))?;
        self.set_value(&["locale", "gl"], Value::String(gl))
    }

    // ============ Backend endpoints ============

    /// Gets the catalog API base URL override, if any
    ///
    /// Returns `None` when not configured, meaning the public endpoint
    /// should be used.
    pub fn get_innertube_base_url(&self) -> Option<String> {
        match self.get_value(&["innertube", "base_url"]) {
            Ok(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    impl_string_config!(
        get_sponsorblock_base_url,
        set_sponsorblock_base_url,
        &["sponsorblock", "base_url"],
        DEFAULT_SPONSORBLOCK_BASE_URL
    );

    impl_bool_config!(
        get_sponsorblock_enabled,
        set_sponsorblock_enabled,
        &["sponsorblock", "enabled"],
        true
    );

    /// Gets the list of segment categories to skip
    pub fn get_sponsorblock_categories(&self) -> Vec<String> {
        match self.get_value(&["sponsorblock", "categories"]) {
            Ok(Value::Sequence(seq)) => seq
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => vec![
                "sponsor".to_string(),
                "music_offtopic".to_string(),
                "poi_highlight".to_string(),
            ],
        }
    }

    // ============ Library ============

    /// Gets the absolute path of the library SQLite database
    ///
    /// The containing directory is created if it doesn't exist.
    pub fn get_library_db_path(&self) -> Result<String> {
        let dir = self.get_managed_dir(&["library", "directory"], DEFAULT_LIBRARY_DIR)?;
        let db_file = match self.get_value(&["library", "db_file"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_LIBRARY_DB_FILE.to_string(),
        };
        Ok(Path::new(&dir).join(db_file).to_string_lossy().to_string())
    }

    // ============ Logger ============

    /// Gets the minimum log level from the configuration
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(&["host", "logger", "min_level"])? {
            Value::String(s) => Ok(s),
            _ => Ok(DEFAULT_LOG_MIN_LEVEL.to_string()),
        }
    }

    /// Sets the minimum log level in the configuration
    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(&["host", "logger", "min_level"], Value::String(level))
    }

    impl_bool_config!(
        get_log_enable_console,
        set_log_enable_console,
        &["host", "logger", "enable_console"],
        DEFAULT_LOG_ENABLE_CONSOLE
    );

    // ============ User preferences ============

    impl_usize_config!(
        get_home_tab_index,
        set_home_tab_index,
        &["preferences", "home_tab_index"],
        0
    );

    impl_usize_config!(
        get_search_tab_index,
        set_search_tab_index,
        &["preferences", "search_tab_index"],
        0
    );

    impl_string_config!(
        get_song_sort_by,
        set_song_sort_by,
        &["preferences", "songs", "sort_by"],
        "date_added"
    );

    impl_string_config!(
        get_song_sort_order,
        set_song_sort_order,
        &["preferences", "songs", "sort_order"],
        "descending"
    );

    impl_string_config!(
        get_playlist_sort_by,
        set_playlist_sort_by,
        &["preferences", "playlists", "sort_by"],
        "name"
    );

    impl_string_config!(
        get_playlist_sort_order,
        set_playlist_sort_order,
        &["preferences", "playlists", "sort_order"],
        "ascending"
    );

    impl_string_config!(
        get_album_sort_by,
        set_album_sort_by,
        &["preferences", "albums", "sort_by"],
        "name"
    );

    impl_string_config!(
        get_album_sort_order,
        set_album_sort_order,
        &["preferences", "albums", "sort_order"],
        "ascending"
    );

    impl_string_config!(
        get_artist_sort_by,
        set_artist_sort_by,
        &["preferences", "artists", "sort_by"],
        "name"
    );

    impl_string_config!(
        get_artist_sort_order,
        set_artist_sort_order,
        &["preferences", "artists", "sort_order"],
        "ascending"
    );

    impl_string_config!(
        get_theme_mode,
        set_theme_mode,
        &["preferences", "appearance", "theme_mode"],
        "system"
    );

    impl_bool_config!(
        get_pure_black,
        set_pure_black,
        &["preferences", "appearance", "pure_black"],
        false
    );
}

/// Returns the global configuration instance
///
/// This function provides access to the singleton configuration instance,
/// which is lazily loaded on first access.
///
/// # Examples
///
/// ```no_run
/// use otconfig::get_config;
///
/// let config = get_config();
/// let (hl, gl) = config.get_locale();
/// ```
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

/// Merges external YAML configuration into default configuration
///
/// This function recursively merges two YAML value trees:
/// - For mappings (objects), it merges keys from external into default
/// - For scalars and sequences, external values replace default values
///
/// # Arguments
///
/// * `default` - The default configuration to merge into (modified in place)
/// * `external` - The external configuration to merge from
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // scalars and sequences are replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults_from_embedded_config() {
        let (_dir, config) = temp_config();

        assert_eq!(config.get_locale(), ("en".to_string(), "US".to_string()));
        assert!(config.get_innertube_base_url().is_none());
        assert_eq!(
            config.get_sponsorblock_base_url().unwrap(),
            "https://sponsor.ajay.app"
        );
        assert!(config.get_sponsorblock_enabled().unwrap());
        assert_eq!(
            config.get_sponsorblock_categories(),
            vec![
                "sponsor".to_string(),
                "music_offtopic".to_string(),
                "poi_highlight".to_string()
            ]
        );
    }

    #[test]
    fn test_set_and_get_locale() {
        let (_dir, config) = temp_config();

        config.set_locale("fr".to_string(), "FR".to_string()).unwrap();
        assert_eq!(config.get_locale(), ("fr".to_string(), "FR".to_string()));
    }

    #[test]
    fn test_external_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "locale:\n  hl: de\npreferences:\n  home_tab_index: 2\n",
        )
        .unwrap();

        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        let (hl, gl) = config.get_locale();
        assert_eq!(hl, "de");
        // Keys absent from the external file keep their default
        assert_eq!(gl, "US");
        assert_eq!(config.get_home_tab_index().unwrap(), 2);
    }

    #[test]
    fn test_library_db_path_creates_directory() {
        let (dir, config) = temp_config();

        let db_path = config.get_library_db_path().unwrap();
        assert!(db_path.ends_with("otmusic.db"));
        assert!(dir.path().join("library").is_dir());
    }

    #[test]
    fn test_preference_roundtrip() {
        let (_dir, config) = temp_config();

        assert_eq!(config.get_song_sort_by().unwrap(), "date_added");
        config.set_song_sort_by("title".to_string()).unwrap();
        assert_eq!(config.get_song_sort_by().unwrap(), "title");

        assert!(!config.get_pure_black().unwrap());
        config.set_pure_black(true).unwrap();
        assert!(config.get_pure_black().unwrap());
    }

    #[test]
    fn test_bookmark_sort_preferences() {
        let (_dir, config) = temp_config();

        assert_eq!(config.get_album_sort_by().unwrap(), "name");
        assert_eq!(config.get_artist_sort_order().unwrap(), "ascending");

        config.set_album_sort_by("date_bookmarked".to_string()).unwrap();
        config.set_artist_sort_order("descending".to_string()).unwrap();
        assert_eq!(config.get_album_sort_by().unwrap(), "date_bookmarked");
        assert_eq!(config.get_artist_sort_order().unwrap(), "descending");
    }
}
