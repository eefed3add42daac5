use anyhow::Context;
use clap::Args;

use crate::progress::WeekGrouping;

/// Runtime settings shared by every subcommand; each flag can also come
/// from the environment.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, env = "IPL_MAX_CONNECTIONS", default_value_t = 5, global = true)]
    pub max_connections: u32,

    /// How completed sessions are bucketed in the weekly curve
    #[arg(
        long,
        env = "IPL_WEEK_GROUPING",
        value_enum,
        default_value_t = WeekGrouping::PerSession,
        global = true
    )]
    pub week_grouping: WeekGrouping,
}

impl Settings {
    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .context("DATABASE_URL must be set to a Postgres instance")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::try_parse_from([
            "ipl-tracker",
            "--database-url",
            "postgres://localhost/ipl",
            "--max-connections",
            "2",
            "--week-grouping",
            "iso-week",
        ])
        .unwrap();

        assert_eq!(cli.settings.database_url().unwrap(), "postgres://localhost/ipl");
        assert_eq!(cli.settings.max_connections, 2);
        assert_eq!(cli.settings.week_grouping, WeekGrouping::IsoWeek);
    }

    #[test]
    fn blank_database_url_is_rejected() {
        let settings = Settings {
            database_url: Some("  ".to_string()),
            max_connections: 5,
            week_grouping: WeekGrouping::default(),
        };
        assert!(settings.database_url().is_err());

        let settings = Settings {
            database_url: None,
            ..settings
        };
        assert!(settings.database_url().is_err());
    }
}
