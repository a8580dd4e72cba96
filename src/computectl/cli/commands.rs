use super::render::{print_messages, render_server};
use super::setup::{Cli, Commands, CreateArgs, OutputFormat, ResizeArgs};
use chrono::Utc;
use clap::Parser;
use computectl::api::{build_create_request, required_flavor, CmdResult, CreateServerFlags};
use computectl::error::{ComputectlError, Result};
use computectl::init::initialize;
use computectl::model::ServerIdentity;
use computectl::params::UserDataSource;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Create(args) => handle_create(args, cli.output),
        Commands::Resize(args) => handle_resize(args, cli.output),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "computectl=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_create(args: CreateArgs, output: OutputFormat) -> Result<()> {
    let target = args.name.clone();
    let flags = create_flags(args);

    let result = create(&flags).map_err(|e| e.during("creating", target))?;
    print_result(&result, output);
    Ok(())
}

fn handle_resize(args: ResizeArgs, output: OutputFormat) -> Result<()> {
    let target = non_empty(&args.id)
        .or(non_empty(&args.name))
        .unwrap_or_default()
        .to_string();

    let result = resize(&args).map_err(|e| e.during("resizing", target))?;
    print_result(&result, output);
    Ok(())
}

// Input errors win over config errors: flags are checked before the config
// is read.
fn create(flags: &CreateServerFlags) -> Result<CmdResult> {
    let request = build_create_request(flags)?;
    let mut api = initialize()?;
    api.create_server(request)
}

fn resize(args: &ResizeArgs) -> Result<CmdResult> {
    let identity = server_identity(args)?;
    let flavor_id = required_flavor(args.flavor_id.as_deref())?;
    let mut api = initialize()?;
    api.resize_server(&identity, Some(flavor_id.as_str()))
}

fn create_flags(args: CreateArgs) -> CreateServerFlags {
    let user_data = match (args.user_data, args.user_data_file, args.user_data_literal) {
        (Some(value), _, _) => Some(UserDataSource::Auto(value)),
        (_, Some(path), _) => Some(UserDataSource::File(path)),
        (_, _, Some(text)) => Some(UserDataSource::Literal(text)),
        (None, None, None) => None,
    };

    CreateServerFlags {
        name: args.name,
        image_ref: args.image_ref,
        image_name: args.image_name,
        flavor_ref: args.flavor_ref,
        flavor_name: args.flavor_name,
        boot_volume: args.boot_volume,
        security_groups: args.security_groups,
        user_data,
        networks: args.networks,
        metadata: args.metadata,
        admin_pass: args.admin_pass,
        key_pair: args.key_pair,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// clap allows only one of `--id` / `--name`; an empty value counts as absent.
fn server_identity(args: &ResizeArgs) -> Result<ServerIdentity> {
    match (non_empty(&args.id), non_empty(&args.name)) {
        (Some(id), _) => Ok(ServerIdentity::ById(id.to_string())),
        (None, Some(name)) => Ok(ServerIdentity::ByName(name.to_string())),
        (None, None) => Err(ComputectlError::MalformedInput(
            "Required flag [id] or [name] for resize not set".to_string(),
        )),
    }
}

fn print_result(result: &CmdResult, output: OutputFormat) {
    if let Some(server) = &result.server {
        debug!(id = %server.id, "rendering server record");
        print!("{}", render_server(server, output, Utc::now()));
        if output == OutputFormat::Json {
            println!();
        }
    }
    print_messages(&result.messages, output);
}
