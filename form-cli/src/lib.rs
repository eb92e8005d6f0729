pub mod args;
pub mod config;
pub mod dns;
pub mod output;
pub mod subcommand;

pub use args::{ArgumentParseError, FlagSchema, ParsedArgs};
pub use config::{Config, ConfigOverrides};
pub use dns::{DnsCommand, DnsHandlers, RemoteHandlers};
pub use subcommand::{Resolution, SubcommandTable};
