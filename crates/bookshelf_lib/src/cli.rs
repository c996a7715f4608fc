use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, about, version)]
pub struct CliOptions {
    /// Path to the YAML configuration file. Defaults are used for everything
    /// when omitted.
    #[clap(long, env = "BOOKSHELF_CONFIG")]
    pub config: Option<PathBuf>,
    /// Overrides the GraphQL API port from the configuration file.
    #[clap(long, env = "BOOKSHELF_PORT")]
    pub port: Option<u16>,
}
