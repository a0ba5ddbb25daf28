use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use flakegen::GeneratorConfig;

/// Runtime configuration for the `flakegen` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "flakegen",
    version,
    about = "Mint and decode Snowflake-style 64-bit IDs"
)]
pub struct CliArgs {
    /// Custom epoch as a `YYYY-MM-DD` date, read at midnight Asia/Shanghai
    /// time. Defaults to 2023-01-01.
    ///
    /// Environment variable: `START_TIME`
    #[arg(long, env = "START_TIME", global = true)]
    pub start_time: Option<String>,

    /// Log output format. Logs are written to stderr.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mint new IDs and print one per line.
    Generate {
        /// Machine ID of this process, in 0..=1023. Must be unique among all
        /// processes minting IDs into the same namespace.
        ///
        /// Environment variable: `MACHINE_ID`
        #[arg(long, env = "MACHINE_ID", allow_negative_numbers = true)]
        machine_id: i64,

        /// Number of IDs to mint.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Split an ID into its fields.
    Decode {
        /// The ID to decode.
        id: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        generator: GeneratorConfig,
        count: usize,
    },
    Decode {
        id: i64,
        start_time: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub action: Action,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let action = match args.command {
            Command::Generate { machine_id, count } => {
                if count == 0 {
                    bail!("--count must be greater than 0");
                }
                Action::Generate {
                    generator: GeneratorConfig {
                        machine_id,
                        start_time: args.start_time,
                    },
                    count,
                }
            }
            Command::Decode { id } => {
                if id < 0 {
                    bail!("ID ({id}) must not be negative");
                }
                Action::Decode {
                    id,
                    start_time: args.start_time,
                }
            }
        };

        Ok(Self {
            action,
            log_format: args.log_format,
        })
    }
}
