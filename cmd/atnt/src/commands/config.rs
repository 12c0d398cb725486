//! Configuration management commands.

use clap::{Args, Subcommand};

use facedb_cli::Context as CliContext;

use super::get_config;
use crate::Cli;

/// Manage CLI configuration.
///
/// Contexts name the places a copy of the images lives, so dumplist and
/// checkfiles can be run without repeating -d and -e.
///
/// Configuration is stored in ~/.facedb/atnt/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Add a new context
    #[command(name = "add-context")]
    AddContext {
        /// Context name
        name: String,
        /// Root directory of the images
        #[arg(long)]
        directory: String,
        /// Image file extension, including the dot
        #[arg(long, default_value = ".pgm")]
        extension: String,
    },
    /// Delete a context
    #[command(name = "delete-context")]
    DeleteContext {
        /// Context name
        name: String,
    },
    /// Set the current context
    #[command(name = "use-context")]
    UseContext {
        /// Context name
        name: String,
    },
    /// Display the current context
    #[command(name = "get-context")]
    GetContext,
    /// List all contexts
    #[command(name = "list-contexts", alias = "get-contexts")]
    ListContexts,
    /// View the current configuration
    View,
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::AddContext {
                name,
                directory,
                extension,
            } => {
                let mut cfg = get_config(cli)?;
                let ctx = CliContext {
                    directory: directory.clone(),
                    extension: extension.clone(),
                    ..Default::default()
                };
                cfg.add_context(name, ctx)?;
                facedb_cli::print_success(&format!("Context \"{}\" added successfully", name));
                Ok(())
            }

            ConfigSubcommand::DeleteContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.delete_context(name)?;
                facedb_cli::print_success(&format!("Context \"{}\" deleted", name));
                Ok(())
            }

            ConfigSubcommand::UseContext { name } => {
                let mut cfg = get_config(cli)?;
                cfg.use_context(name)?;
                facedb_cli::print_success(&format!("Switched to context \"{}\"", name));
                Ok(())
            }

            ConfigSubcommand::GetContext => {
                let cfg = get_config(cli)?;
                if cfg.current_context.is_empty() {
                    println!("No current context set");
                } else {
                    println!("{}", cfg.current_context);
                }
                Ok(())
            }

            ConfigSubcommand::ListContexts => {
                let cfg = get_config(cli)?;

                if cfg.contexts.is_empty() {
                    println!("No contexts configured");
                    return Ok(());
                }

                println!("{:<8} {:<20} {:<40} {}", "CURRENT", "NAME", "DIRECTORY", "EXTENSION");
                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    let current = if name == cfg.current_context { "*" } else { "" };
                    println!(
                        "{:<8} {:<20} {:<40} {}",
                        current,
                        name,
                        ctx.directory().unwrap_or("(unset)"),
                        ctx.extension().unwrap_or("(unset)")
                    );
                }

                Ok(())
            }

            ConfigSubcommand::View => {
                let cfg = get_config(cli)?;

                println!("Config file: {}", cfg.path().display());
                println!("Current context: {}", cfg.current_context);
                println!("Contexts: {}", cfg.contexts.len());

                for name in cfg.list_contexts() {
                    let Some(ctx) = cfg.get_context(name) else {
                        continue;
                    };
                    println!("\n  {}:", name);
                    if let Some(directory) = ctx.directory() {
                        println!("    Directory: {}", directory);
                    }
                    if let Some(extension) = ctx.extension() {
                        println!("    Extension: {}", extension);
                    }
                }

                Ok(())
            }
        }
    }
}
