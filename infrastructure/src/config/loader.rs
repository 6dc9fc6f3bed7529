//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["interrogation.toml", ".interrogation.toml"];
const ENV_PREFIX: &str = "INTERROGATION_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `INTERROGATION_*` environment variables (`__` separates section and key)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./interrogation.toml` or `./.interrogation.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/interrogation-sim/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("interrogation-sim").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./interrogation.toml or ./.interrogation.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.gemini.model, "gemini-2.5-flash-preview-04-17");
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("interrogation-sim"));
    }

    #[test]
    fn test_project_file_then_explicit_then_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "interrogation.toml",
                r#"
[gemini]
model = "project-model"
timeout_secs = 10

[output]
color = false
"#,
            )?;
            jail.create_file(
                "override.toml",
                r#"
[gemini]
timeout_secs = 20
"#,
            )?;
            jail.set_env("INTERROGATION_GEMINI__MODEL", "env-model");

            let config = ConfigLoader::load(Some(Path::new("override.toml"))).map_err(|e| *e)?;

            assert_eq!(config.gemini.model, "env-model");
            assert_eq!(config.gemini.timeout_secs, 20);
            assert!(!config.output.color);
            assert_eq!(config.gemini.summary_temperature, 0.3);
            Ok(())
        });
    }

    #[test]
    fn test_hidden_project_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                ".interrogation.toml",
                r#"
[logging]
export_dir = "out"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.logging.export_dir, "out");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "interrogation.toml",
                r#"
[gemini]
timeout_secs = "soon"
"#,
            )?;

            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
