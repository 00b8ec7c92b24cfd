//! How commands report provisioning results on stdout.
//!
//! Logs go to stderr, so stdout carries only the command result: a short
//! colored status for operators, or a single JSON object per command for
//! wrappers and service managers.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Shape of command results on stdout.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Status lines for a terminal, e.g. `Configuration OK.` and the node
    #[default]
    Pretty,
    /// One JSON object (`status`, `subject`, `node`, ...) per invocation
    Json,
}

/// Accepts the `output_format` values written to the settings file.
impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("output_format must be `pretty` or `json`, got `{s}`"),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_values_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);

        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("`yaml`"));
    }

    #[test]
    fn display_matches_settings_spelling() {
        for format in [OutputFormat::Pretty, OutputFormat::Json] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
