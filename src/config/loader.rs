// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pong-arena");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

/// Load configuration from an explicit path
///
/// A file that fails to parse is not fatal: the defaults are used and the
/// problem is logged, so a typo never keeps the game from starting.
pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    if path.exists() {
        let contents = fs::read_to_string(path)?;
        Ok(parse_config(&contents))
    } else {
        create_default_config(path)?;
        Ok(Config::default())
    }
}

fn parse_config(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "failed to parse config file, using defaults");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string = toml::to_string_pretty(&config).map_err(io::Error::other)?;

    let commented_toml = format!(
        "# Pong Arena Configuration File\n\
         # Edit this file to customize controls and ball physics\n\
         # Changes take effect on the next launch\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\", \"Space\"\n\
         #                     or single characters like \"W\", \"S\", \"Q\", etc.\n\
         #\n\
         # Speeds are in arena units per frame (arena is 800 units wide)\n\
         #\n\
         # AI difficulties: \"easy\", \"medium\", \"hard\", \"impossible\"\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    info!(path = %path.display(), "created default config file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;

    #[test]
    fn test_default_config_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        let parsed: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(parsed.physics, config.physics);
        assert_eq!(
            parsed.keybindings.left_paddle_up,
            config.keybindings.left_paddle_up
        );
        assert_eq!(parsed.display.target_fps, config.display.target_fps);
        assert_eq!(parsed.ai.difficulty, config.ai.difficulty);
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let partial_toml = r#"
            [physics]
            max_ball_speed = 20.0

            [ai]
            difficulty = "impossible"
        "#;

        let config: Config = toml::from_str(partial_toml).unwrap();

        assert_eq!(config.physics.max_ball_speed, 20.0);
        assert_eq!(config.ai.difficulty, Difficulty::Impossible);

        // Untouched fields keep their defaults
        assert_eq!(config.physics.ball_initial_speed, 5.0);
        assert_eq!(config.keybindings.right_paddle_up, "O");
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let config = parse_config("[physics\nmax_ball_speed = ");
        assert_eq!(config.physics, Config::default().physics);
    }

    #[test]
    fn test_missing_file_writes_default() {
        let dir = std::env::temp_dir().join(format!("pong-arena-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.display.target_fps, 60);
        assert!(path.exists());

        let reloaded = load_config_from(&path).unwrap();
        assert_eq!(reloaded.physics, config.physics);

        fs::remove_dir_all(&dir).ok();
    }
}
