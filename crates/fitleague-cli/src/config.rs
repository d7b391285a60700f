// Configuration loading and parsing (config/league.toml).

use chrono::NaiveDate;
use fitleague_core::rules::{build_league_rules, LeagueRules, Sport};
use fitleague_core::standings::ScoringFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

/// Validated configuration. `sport` and `scoring_format` are the parsed forms
/// of the corresponding `[league]` strings.
#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub schedule: ScheduleConfig,
    pub sport: Sport,
    pub scoring_format: Option<ScoringFormat>,
}

impl Config {
    /// The rules document for the configured league.
    pub fn rules(&self) -> LeagueRules {
        build_league_rules(
            self.sport,
            &self.league.match_type,
            &self.league.rotation,
            &self.league.running_comparison,
            self.league.starts_on,
            self.league.season_weeks,
        )
    }

    /// Explicit `scoring_format` if set, otherwise the one the rules imply.
    pub fn effective_scoring_format(&self) -> ScoringFormat {
        self.scoring_format
            .unwrap_or_else(|| self.rules().scoring_format())
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    pub sport: String,
    #[serde(default)]
    pub match_type: String,
    #[serde(default)]
    pub rotation: String,
    #[serde(default)]
    pub running_comparison: String,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    pub season_weeks: u32,
    #[serde(default)]
    pub scoring_format: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    /// Seed for the random partner draw. `None` draws fresh each run.
    #[serde(default)]
    pub seed: Option<u64>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config_at` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    validate(league_file.league, league_file.schedule)
}

/// Files under `config/` that ship with a default.
const CONFIG_FILES: &[&str] = &["league.toml"];

/// Copy each missing config file from `defaults/`. Returns the files copied.
/// Existing config is never overwritten.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or pass --dir",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    let copy_error = |message: String| ConfigError::DefaultsCopyError { message };
    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create config directory: {e}")))?;

    let mut copied = Vec::new();
    for name in CONFIG_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if target.exists() || !source.is_file() {
            continue;
        }
        std::fs::copy(&source, &target)
            .map_err(|e| copy_error(format!("failed to copy {}: {e}", source.display())))?;
        copied.push(target);
    }

    Ok(copied)
}

/// Copy any missing defaults into `base_dir/config`, then load.
pub fn load_config_at(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

/// `load_config_at` for the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_at(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(league: LeagueConfig, schedule: ScheduleConfig) -> Result<Config, ConfigError> {
    if league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    let sport: Sport = league
        .sport
        .parse()
        .map_err(|e| ConfigError::ValidationError {
            field: "league.sport".into(),
            message: format!("{e}"),
        })?;

    if league.season_weeks == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.season_weeks".into(),
            message: "must be greater than 0".into(),
        });
    }

    let scoring_format = match league.scoring_format.as_deref() {
        None => None,
        Some(s) => Some(s.parse().map_err(|e| ConfigError::ValidationError {
            field: "league.scoring_format".into(),
            message: format!("{e}"),
        })?),
    };

    Ok(Config {
        league,
        schedule,
        sport,
        scoring_format,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Path to the fitleague-cli crate root (works from the crate root or the
    /// workspace root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("crates/fitleague-cli/defaults").exists() {
            cwd.join("crates/fitleague-cli")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    /// Fresh temp dir containing `config/league.toml` with `league_toml`.
    fn temp_config(name: &str, league_toml: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/league.toml"), league_toml).unwrap();
        tmp
    }

    fn expect_invalid(name: &str, league_toml: &str, expected_field: &str) {
        let tmp = temp_config(name, league_toml);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_valid_config_from_project_files() {
        let tmp = std::env::temp_dir().join("fitleague_config_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            project_root().join("defaults/league.toml"),
            tmp.join("config/league.toml"),
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.league.name, "Thursday Night Pickleball");
        assert_eq!(config.sport, Sport::Pickleball);
        assert_eq!(config.league.match_type, "doubles");
        assert_eq!(config.league.rotation, "random");
        assert_eq!(config.league.season_weeks, 8);
        assert_eq!(
            config.league.starts_on,
            NaiveDate::from_ymd_opt(2026, 1, 8)
        );
        assert!(config.schedule.seed.is_none());
        assert!(config.scoring_format.is_none());
        assert_eq!(config.effective_scoring_format(), ScoringFormat::Doubles);

        let rules = config.rules();
        assert_eq!(rules.sport(), Sport::Pickleball);
        assert_eq!(rules.schedule.season_weeks, 8);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn minimal_running_config() {
        let tmp = temp_config(
            "fitleague_config_running",
            r#"
[league]
name = "Dawn Patrol"
sport = "Running"
season_weeks = 6
scoring_format = "individual_time"

[schedule]
seed = 7
"#,
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.sport, Sport::Running);
        assert_eq!(config.schedule.seed, Some(7));
        assert_eq!(config.scoring_format, Some(ScoringFormat::IndividualTime));
        assert!(config.league.match_type.is_empty());
        assert!(config.rules().lineup().is_none());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_sport() {
        expect_invalid(
            "fitleague_config_bad_sport",
            "[league]\nname = \"X\"\nsport = \"curling\"\nseason_weeks = 4\n",
            "league.sport",
        );
    }

    #[test]
    fn rejects_zero_season_weeks() {
        expect_invalid(
            "fitleague_config_zero_weeks",
            "[league]\nname = \"X\"\nsport = \"tennis\"\nseason_weeks = 0\n",
            "league.season_weeks",
        );
    }

    #[test]
    fn rejects_blank_name() {
        expect_invalid(
            "fitleague_config_blank_name",
            "[league]\nname = \"  \"\nsport = \"tennis\"\nseason_weeks = 4\n",
            "league.name",
        );
    }

    #[test]
    fn rejects_unknown_scoring_format() {
        expect_invalid(
            "fitleague_config_bad_format",
            "[league]\nname = \"X\"\nsport = \"tennis\"\nseason_weeks = 4\nscoring_format = \"elo\"\n",
            "league.scoring_format",
        );
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = std::env::temp_dir().join("fitleague_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = temp_config("fitleague_config_bad_toml", "this is not valid [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_copies_missing_files() {
        let tmp = std::env::temp_dir().join("fitleague_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(&defaults_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), defaults_dir.join("league.toml")).unwrap();
        fs::copy(
            root.join("defaults/roster.json.example"),
            defaults_dir.join("roster.json.example"),
        )
        .unwrap();
        assert!(!tmp.join("config").exists());

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert_eq!(copied.len(), 1);
        assert!(tmp.join("config/league.toml").exists());
        assert!(!tmp.join("config/roster.json.example").exists());

        let config = load_config_at(&tmp).expect("copied defaults should load");
        assert_eq!(config.sport, Sport::Pickleball);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_skips_existing() {
        let tmp = std::env::temp_dir().join("fitleague_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        let config_dir = tmp.join("config");
        fs::create_dir_all(&defaults_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();

        fs::copy(
            project_root().join("defaults/league.toml"),
            defaults_dir.join("league.toml"),
        )
        .unwrap();
        fs::write(config_dir.join("league.toml"), "# custom\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        let content = fs::read_to_string(config_dir.join("league.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_ignores_unknown_defaults() {
        let tmp = std::env::temp_dir().join("fitleague_config_ensure_unknown");
        let _ = fs::remove_dir_all(&tmp);
        let defaults_dir = tmp.join("defaults");
        fs::create_dir_all(defaults_dir.join("archive")).unwrap();
        fs::write(defaults_dir.join("notes.txt"), "scratch\n").unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());
        assert!(tmp.join("config").is_dir());
        assert!(!tmp.join("config/notes.txt").exists());
        assert!(!tmp.join("config/archive").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_no_defaults_dir_is_ok() {
        let tmp = std::env::temp_dir().join("fitleague_config_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let copied = ensure_config_files(&tmp).expect("should succeed");
        assert!(copied.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_files_errors_when_both_dirs_missing() {
        let tmp = std::env::temp_dir().join("fitleague_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = ensure_config_files(&tmp).unwrap_err();
        match &err {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("neither defaults/ nor config/"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
