// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::{Result, TickrunError};

/// Settings exactly as written in `Tickrun.toml`, before defaults and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    /// Directory where worker output logs live. Default: ".".
    pub working_dir: Option<String>,

    /// Root of the document store. Relative paths resolve under
    /// `working_dir`. Default: ".tickrun".
    pub data_dir: Option<String>,

    #[serde(default)]
    pub agent: RawAgentSettings,
}

/// Agent invocation settings as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAgentSettings {
    pub program: Option<String>,
    pub model: Option<String>,
    pub args: Option<Vec<String>>,
}

/// Validated, fully-resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub working_dir: PathBuf,
    pub data_dir: PathBuf,
    pub agent: AgentSettings,
}

/// How to invoke the code agent for `execute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    pub program: String,
    pub model: String,
    pub args: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        AgentSettings {
            program: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            args: vec!["-y".to_string()],
        }
    }
}

impl Settings {
    /// Apply defaults and validate, with an optional working-directory
    /// override (from `TICKRUN_WORKDIR`) taking precedence over the file.
    ///
    /// Pure: no environment access happens here, so resolution is fully
    /// testable. See [`crate::config::loader::load_or_default`] for the
    /// entry point that reads the environment.
    pub fn resolve(raw: RawSettings, working_dir_override: Option<String>) -> Result<Settings> {
        let working_dir = working_dir_override.or(raw.working_dir).unwrap_or_else(|| ".".to_string());
        if working_dir.trim().is_empty() {
            return Err(TickrunError::ConfigError(
                "working_dir must not be empty".to_string(),
            ));
        }
        let working_dir = PathBuf::from(working_dir);

        let data_dir = PathBuf::from(raw.data_dir.unwrap_or_else(|| ".tickrun".to_string()));
        let data_dir = if data_dir.is_relative() {
            working_dir.join(data_dir)
        } else {
            data_dir
        };

        let defaults = AgentSettings::default();
        let agent = AgentSettings {
            program: raw.agent.program.unwrap_or(defaults.program),
            model: raw.agent.model.unwrap_or(defaults.model),
            args: raw.agent.args.unwrap_or(defaults.args),
        };
        if agent.program.trim().is_empty() {
            return Err(TickrunError::ConfigError(
                "agent.program must not be empty".to_string(),
            ));
        }

        Ok(Settings {
            working_dir,
            data_dir,
            agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = Settings::resolve(RawSettings::default(), None).unwrap();

        assert_eq!(settings.working_dir, PathBuf::from("."));
        assert_eq!(settings.data_dir, PathBuf::from("./.tickrun"));
        assert_eq!(settings.agent.program, "gemini");
        assert_eq!(settings.agent.model, "gemini-2.5-flash");
        assert_eq!(settings.agent.args, vec!["-y".to_string()]);
    }

    #[test]
    fn working_dir_override_beats_file_value() {
        let raw = RawSettings {
            working_dir: Some("/from/file".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(raw, Some("/from/env".to_string())).unwrap();

        assert_eq!(settings.working_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn relative_data_dir_resolves_under_working_dir() {
        let raw = RawSettings {
            working_dir: Some("/work".to_string()),
            data_dir: Some("state".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(raw, None).unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("/work/state"));
    }

    #[test]
    fn absolute_data_dir_is_kept_as_is() {
        let raw = RawSettings {
            data_dir: Some("/var/lib/tickrun".to_string()),
            ..Default::default()
        };
        let settings = Settings::resolve(raw, None).unwrap();

        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/tickrun"));
    }

    #[test]
    fn empty_working_dir_is_rejected() {
        let raw = RawSettings {
            working_dir: Some("  ".to_string()),
            ..Default::default()
        };
        let err = Settings::resolve(raw, None).unwrap_err();

        match err {
            TickrunError::ConfigError(msg) => assert!(msg.contains("working_dir")),
            other => panic!("expected ConfigError, got: {other:?}"),
        }
    }

    #[test]
    fn empty_agent_program_is_rejected() {
        let raw = RawSettings {
            agent: RawAgentSettings {
                program: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = Settings::resolve(raw, None).unwrap_err();

        match err {
            TickrunError::ConfigError(msg) => assert!(msg.contains("agent.program")),
            other => panic!("expected ConfigError, got: {other:?}"),
        }
    }
}
