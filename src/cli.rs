use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ClientType, Config, LogColor, LogFormat, LogLevel};
use crate::dates::parse_day;
use crate::listing::Selection;
use crate::rehydrate::Mode;

pub const LICENSE_CONDITIONS: &str = "\
This program is free software: you can redistribute it and/or modify it
under the terms of the GNU General Public License as published by the
Free Software Foundation, either version 3 of the License, or (at your
option) any later version.

You should have received a copy of the GNU General Public License along
with this program. If not, see <http://www.gnu.org/licenses/>.";

pub const LICENSE_WARRANTY: &str = "\
This program is distributed in the hope that it will be useful, but
WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General
Public License for more details.";

/// Decode Dinkur entry payloads into typed records.
#[derive(Debug, Parser)]
#[command(name = "dinkur-bind", version, about)]
pub struct Cli {
    #[arg(help = "JSON payload to decode; reads stdin when omitted")]
    pub payload: Option<PathBuf>,

    #[arg(long, help = "Config file to use instead of the default location")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with_all = ["day", "active"],
        help = "Treat an object payload as a map of key to entry"
    )]
    pub map: bool,

    #[arg(
        long,
        value_parser = parse_day,
        conflicts_with = "active",
        help = "Only show entries starting on this day (YYYY-MM-DD or \"today\")"
    )]
    pub day: Option<NaiveDate>,

    #[arg(long, help = "Only show the entry that is still tracking time")]
    pub active: bool,

    #[arg(long, help = "Print normalized JSON instead of a listing")]
    pub json: bool,

    #[arg(long, help = "Write the effective config to the default location and exit")]
    pub write_config: bool,

    #[arg(long, value_enum, help = "Dinkur client kind")]
    pub client: Option<ClientType>,

    #[arg(long, help = "Database file")]
    pub sqlite_path: Option<PathBuf>,

    #[arg(long, help = "Address of the Dinkur daemon API")]
    pub grpc_address: Option<String>,

    #[arg(long, help = "Bind address when hosting the Dinkur daemon API")]
    pub daemon_bind_address: Option<String>,

    #[arg(long, value_enum, help = "Logging severity")]
    pub log_level: Option<LogLevel>,

    #[arg(long, value_enum, help = "Logging format")]
    pub log_format: Option<LogFormat>,

    #[arg(long, value_enum, help = "Colored log output")]
    pub log_color: Option<LogColor>,

    #[arg(short, long, help = "Enable debug logging (short for --log-level=debug)")]
    pub verbose: bool,

    #[arg(long = "license-c", help = "Show the program's license conditions")]
    pub license_conditions: bool,

    #[arg(long = "license-w", help = "Show the program's license warranty")]
    pub license_warranty: bool,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        match (self.day, self.active) {
            (Some(day), _) => Selection::Day(day),
            (None, true) => Selection::Active,
            (None, false) if self.map => Selection::All(Mode::Map),
            (None, false) => Selection::All(Mode::Object),
        }
    }

    /// Overrides config values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        if let Some(client) = self.client {
            config.client = client;
        }
        if let Some(path) = &self.sqlite_path {
            config.sqlite.path = path.clone();
        }
        if let Some(address) = &self.grpc_address {
            config.grpc.address = address.clone();
        }
        if let Some(address) = &self.daemon_bind_address {
            config.daemon.bind_address = address.clone();
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(format) = self.log_format {
            config.log.format = format;
        }
        if let Some(color) = self.log_color {
            config.log.color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "dinkur-bind",
            "--client",
            "grpc",
            "--grpc-address",
            "example:1",
            "--log-format",
            "json",
            "--log-color",
            "never",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.client, ClientType::Grpc);
        assert_eq!(config.grpc.address, "example:1");
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.color, LogColor::Never);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn day_accepts_dates_and_today() {
        let cli = Cli::parse_from(["dinkur-bind", "--day", "2026-02-03", "entries.json"]);
        assert_eq!(cli.day, NaiveDate::from_ymd_opt(2026, 2, 3));
        assert_eq!(cli.payload, Some(PathBuf::from("entries.json")));
        assert!(Cli::try_parse_from(["dinkur-bind", "--day", "today"]).is_ok());
        assert!(Cli::try_parse_from(["dinkur-bind", "--day", "03/02/2026"]).is_err());
    }

    #[test]
    fn flags_pick_the_selection() {
        let select = |args: &[&str]| Cli::parse_from(args.iter().copied()).selection();
        assert_eq!(select(&["dinkur-bind"]), Selection::All(Mode::Object));
        assert_eq!(select(&["dinkur-bind", "--map"]), Selection::All(Mode::Map));
        assert_eq!(select(&["dinkur-bind", "--active"]), Selection::Active);
        assert_eq!(
            select(&["dinkur-bind", "--day", "2026-02-03"]),
            Selection::Day(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap())
        );
    }

    #[test]
    fn map_conflicts_with_day() {
        assert!(Cli::try_parse_from(["dinkur-bind", "--map", "--day", "today"]).is_err());
    }

    #[test]
    fn license_flags_parse() {
        let cli = Cli::parse_from(["dinkur-bind", "--license-c"]);
        assert!(cli.license_conditions);
        assert!(!cli.license_warranty);
    }
}
