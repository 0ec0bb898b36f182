use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "destinations")]
#[command(about = "Resolve host:port destinations into socket addresses", long_about = None)]
pub struct CliArgs {
    /// Destinations as host:port or host:port/path
    #[arg(value_name = "DESTINATION")]
    pub destinations: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Only resolve IPv4 addresses
    #[arg(short = '4', long, conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Only resolve IPv6 addresses
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override log directory
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Override log file name
    #[arg(long)]
    pub log_file: Option<String>,
}
