use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "droplets", bin_name = "droplets", version)]
#[command(about = "Package, upload, build and launch droplets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Droplet store directory (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file, or a directory packaged as a tar archive, as a droplet's bits
    #[command(alias = "ub")]
    UploadBits {
        /// Name of the droplet
        droplet_name: Option<String>,

        /// File or directory to upload
        path: Option<String>,
    },

    /// Package the working directory, upload it and submit a build
    #[command(alias = "bd")]
    BuildDroplet {
        /// Name of the droplet
        droplet_name: Option<String>,

        /// Buildpack to build with
        buildpack_url: Option<String>,

        /// Directory to package instead of the working directory
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,
    },

    /// List droplets, most recent first
    #[command(alias = "ls")]
    ListDroplets,

    /// Launch a built droplet
    LaunchDroplet {
        /// Name of the droplet
        droplet_name: String,
    },

    /// Remove a droplet and its bits
    #[command(alias = "rm")]
    RemoveDroplet {
        /// Name of the droplet
        droplet_name: String,
    },
}

/// Positional arguments as the command layer validates them.
pub fn positional(args: [Option<String>; 2]) -> Vec<String> {
    args.into_iter().flatten().collect()
}
