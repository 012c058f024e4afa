use super::print::{print_droplets, print_messages};
use super::setup::{positional, Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use droplets::api::{CmdResult, DropletsApi, ExitCode};
use droplets::archive::Archiver;
use droplets::config::DropletsConfig;
use droplets::error::{DropletError, Result};
use droplets::store::fs::FileRunner;
use log::debug;
use std::path::PathBuf;

const HOME_ENV: &str = "DROPLETS_HOME";

struct AppContext {
    api: DropletsApi<FileRunner>,
}

/// Parse, dispatch and print. Returns the process exit code.
pub fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Ok(if err.use_stderr() {
                ExitCode::InvalidSyntax.code()
            } else {
                0
            });
        }
    };

    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    let result = match cli.command {
        Commands::UploadBits { droplet_name, path } => {
            ctx.api.upload_bits(&positional([droplet_name, path]))
        }
        Commands::BuildDroplet {
            droplet_name,
            buildpack_url,
            source,
        } => match source.map_or_else(std::env::current_dir, Ok) {
            Ok(source) => ctx
                .api
                .build_droplet(&source, &positional([droplet_name, buildpack_url])),
            Err(err) => unreadable_working_dir(&err),
        },
        Commands::ListDroplets => handle_list(&ctx),
        Commands::LaunchDroplet { droplet_name } => ctx.api.launch_droplet(&droplet_name),
        Commands::RemoveDroplet { droplet_name } => ctx.api.remove_droplet(&droplet_name),
    };

    print_messages(&result.messages);
    Ok(result.exit_code())
}

fn handle_list(ctx: &AppContext) -> CmdResult {
    let result = ctx.api.list_droplets();
    if result.is_success() {
        print_droplets(&result.listed_droplets);
    }
    result
}

fn unreadable_working_dir(err: &std::io::Error) -> CmdResult {
    let mut result = CmdResult::default();
    result.fail(format!("Error opening .: {}", err), ExitCode::FileSystemError);
    result
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let home = droplets_home()?;
    let config = DropletsConfig::load(&home)?;

    let store_dir = cli
        .store
        .clone()
        .unwrap_or_else(|| config.store_dir(&home));
    debug!("home {}, store {}", home.display(), store_dir.display());

    let archiver = match config.temp_dir {
        Some(dir) => Archiver::with_temp_dir(dir),
        None => Archiver::new(),
    };

    Ok(AppContext {
        api: DropletsApi::new(FileRunner::new(store_dir), archiver),
    })
}

fn droplets_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "droplets", "droplets")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DropletError::Store("Could not determine a home directory".to_string()))
}
