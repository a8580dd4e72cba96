use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "computectl", bin_name = "computectl", version)]
#[command(about = "Create and resize cloud compute servers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for results
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates a new server
    #[command(display_order = 1)]
    Create(CreateArgs),

    /// Resizes an existing server to another flavor
    #[command(display_order = 2)]
    Resize(ResizeArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("user_data_source").args(["user_data", "user_data_file", "user_data_literal"])
))]
pub struct CreateArgs {
    /// Name of the new server
    pub name: String,

    /// The image ID from which to create the server [required unless imageName or bootVolume is given]
    #[arg(long = "imageRef", value_name = "ID")]
    pub image_ref: Option<String>,

    /// The name of the image from which to create the server [required unless imageRef or bootVolume is given]
    #[arg(long = "imageName", value_name = "NAME")]
    pub image_name: Option<String>,

    /// The flavor ID the server should have [required unless flavorName is given]
    #[arg(long = "flavorRef", value_name = "ID")]
    pub flavor_ref: Option<String>,

    /// The name of the flavor the server should have [required unless flavorRef is given]
    #[arg(long = "flavorName", value_name = "NAME")]
    pub flavor_name: Option<String>,

    /// Boot from this existing volume instead of an image
    #[arg(long = "bootVolume", value_name = "VOLUME_ID")]
    pub boot_volume: Option<String>,

    /// Comma-separated names of the security groups the server should belong to
    #[arg(long = "securityGroups", value_name = "GROUPS")]
    pub security_groups: Option<String>,

    /// Configuration or script to run after boot: a file path, or the text itself if no such file exists
    #[arg(long = "userData", value_name = "FILE_OR_TEXT")]
    pub user_data: Option<String>,

    /// Read user data from this file (fails if unreadable)
    #[arg(long = "userDataFile", value_name = "FILE")]
    pub user_data_file: Option<PathBuf>,

    /// Use this text as user data, never reading a file
    #[arg(long = "userDataLiteral", value_name = "TEXT")]
    pub user_data_literal: Option<String>,

    /// Comma-separated IDs of networks to attach. If not provided, the provider's defaults are attached
    #[arg(long, value_name = "IDS")]
    pub networks: Option<String>,

    /// Comma-separated key=value pairs
    #[arg(long, value_name = "PAIRS")]
    pub metadata: Option<String>,

    /// The root password for the server. If not provided, one is generated and shown once
    #[arg(long = "adminPass", value_name = "PASSWORD")]
    pub admin_pass: Option<String>,

    /// The name of the SSH key pair to inject into the server
    #[arg(long = "keypair", value_name = "NAME")]
    pub key_pair: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("server").required(true).args(["id", "name"])))]
pub struct ResizeArgs {
    /// ID of the server to resize
    #[arg(long, value_name = "SERVER_ID")]
    pub id: Option<String>,

    /// Name of the server to resize (must match exactly one server)
    #[arg(long, value_name = "SERVER_NAME")]
    pub name: Option<String>,

    /// [required] The ID of the flavor the resized server should have
    #[arg(long = "flavorID", value_name = "ID")]
    pub flavor_id: Option<String>,
}
