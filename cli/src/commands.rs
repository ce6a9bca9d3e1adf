pub mod fix;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use nono_common::config::{Config, DEFAULT_CONFIG_PATH, TOKEN_ENV};

#[derive(Parser, Debug)]
#[command(name = "nono")]
#[command(about = "Inserts the ninth digit in São Paulo mobile numbers of your Google Contacts.")]
pub struct CommandLine {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Only scan this contact group (e.g. contactGroups/myContacts)
    #[arg(short, long)]
    pub group: Option<String>,
    /// Report what would change without sending any update
    #[arg(long)]
    pub dry_run: bool,
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Reads the config file and applies the command line on top.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let cfg = Config::load(&self.config)
            .with_context(|| format!("could not load {}", self.config.display()))?;
        Ok(self.apply(cfg.with_fallback_token(std::env::var(TOKEN_ENV).ok())))
    }

    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(group) = &self.group {
            cfg.group = Some(group.clone());
        }
        cfg.dry_run |= self.dry_run;
        cfg
    }
}
