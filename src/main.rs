use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use colored::*;
use std::path::PathBuf;
use std::time::Duration;

use renamile::{
    config::Config,
    generator::StructuredGenerator,
    prompt::PromptTemplate,
    renamer::RenameExecutor,
    utils::print_tree,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new("renamile")
        .version("0.1.0")
        .about("Rename files to match their content - extracts text and asks a structured generation service for a better name")
        .subcommand_required(false)
        .subcommand(with_rename_args(
            Command::new("rename")
                .about("Rename files in a workspace directory")
                .arg(
                    Arg::new("directory")
                        .help("Workspace directory to process")
                        .required(true)
                        .index(1),
                ),
        ))
        .subcommand(
            Command::new("config")
                .about("Configuration management")
                .subcommand(Command::new("edit").about("Edit the configuration interactively"))
                .subcommand(Command::new("show").about("Show current configuration"))
                .subcommand(Command::new("reset").about("Reset configuration to defaults")),
        )
        .arg(
            Arg::new("directory")
                .help("Workspace directory to process (default mode)")
                .index(1),
        );

    let matches = with_rename_args(cli).get_matches();

    match matches.subcommand() {
        Some(("rename", sub_matches)) => {
            let target_dir = PathBuf::from(sub_matches.get_one::<String>("directory").unwrap());
            run_rename_command(target_dir, sub_matches).await?;
        }
        Some(("config", sub_matches)) => {
            run_config_command(sub_matches).await?;
        }
        None => {
            if let Some(directory) = matches.get_one::<String>("directory") {
                let target_dir = PathBuf::from(directory);
                run_rename_command(target_dir, &matches).await?;
            } else {
                println!("{}", "📛 Renamile".cyan().bold());
                println!("Use 'renamile --help' for usage information");
                println!("Quick start: renamile <directory>");
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn with_rename_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("dry-run")
            .long("dry-run")
            .help("Run the full pipeline but do not rename anything")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        Arg::new("show-tree")
            .long("show-tree")
            .help("Show the workspace tree before processing")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        Arg::new("yes")
            .long("yes")
            .short('y')
            .help("Do not ask for confirmation before renaming")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        Arg::new("template")
            .long("template")
            .value_name("PATH")
            .help("Prompt template file (overrides the configured path)"),
    )
    .arg(
        Arg::new("generator")
            .long("generator")
            .value_name("COMMAND")
            .help("Structured-generation command (overrides the configured one)"),
    )
    .arg(
        Arg::new("timeout")
            .long("timeout")
            .value_name("SECONDS")
            .help("Per-file generation timeout in seconds"),
    )
}

async fn run_rename_command(target_dir: PathBuf, matches: &ArgMatches) -> Result<()> {
    if !target_dir.exists() {
        eprintln!(
            "{}: Directory does not exist: {}",
            "Error".red().bold(),
            target_dir.display()
        );
        std::process::exit(1);
    }

    if !target_dir.is_dir() {
        eprintln!(
            "{}: Path is not a directory: {}",
            "Error".red().bold(),
            target_dir.display()
        );
        std::process::exit(1);
    }

    println!("{}", "📛 Renamile".cyan().bold());
    println!(
        "Workspace: {}\n",
        target_dir.display().to_string().yellow()
    );

    if matches.get_flag("show-tree") {
        println!("{}", "Current Workspace Structure:".green().bold());
        print_tree(&target_dir, "", true);
        println!();
    }

    let mut config = Config::load()?.unwrap_or_default();
    if let Some(generator) = matches.get_one::<String>("generator") {
        config.generator = generator.clone();
    }
    if let Some(template) = matches.get_one::<String>("template") {
        config.template = PathBuf::from(template);
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        match timeout.parse::<u64>() {
            Ok(secs) if secs > 0 => config.timeout_secs = secs,
            _ => {
                eprintln!(
                    "{}: --timeout must be a positive number of seconds",
                    "Error".red().bold()
                );
                std::process::exit(1);
            }
        }
    }

    // Fatal preconditions: no renaming can proceed without a template or a
    // generator command.
    let template = match PromptTemplate::load(&config.template) {
        Ok(template) => template,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            eprintln!(
                "\n{}",
                "💡 Tip: point --template at a file with {file_name} and {file_content} placeholders".yellow()
            );
            std::process::exit(1);
        }
    };

    let generator = match StructuredGenerator::from_command_line(
        &config.generator,
        Duration::from_secs(config.timeout_secs),
    ) {
        Some(generator) => generator,
        None => {
            eprintln!(
                "{}: The configured generator command is empty",
                "Error".red().bold()
            );
            eprintln!(
                "\n{}",
                "💡 Tip: set one with 'renamile config edit' or pass --generator".yellow()
            );
            std::process::exit(1);
        }
    };

    let dry_run = matches.get_flag("dry-run");
    if !dry_run && !matches.get_flag("yes") {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Rename files under {} in place?",
                target_dir.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled, nothing was changed.".yellow());
            return Ok(());
        }
    }

    let executor = RenameExecutor::new(generator, template, target_dir, dry_run);
    match executor.run().await {
        Ok(_) => {
            println!("\n{}", "🎉 Workspace processing completed!".green().bold());
        }
        Err(e) => {
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn run_config_command(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("edit", _)) => {
            config_edit().await?;
        }
        Some(("show", _)) => {
            config_show().await?;
        }
        Some(("reset", _)) => {
            config_reset().await?;
        }
        None => {
            println!("{}", "Configuration Management".cyan().bold());
            println!("Available commands:");
            println!("  edit  - Edit configuration interactively");
            println!("  show  - Show current configuration");
            println!("  reset - Reset configuration to defaults");
            println!("\nUse 'renamile config --help' for more information");
        }
        _ => unreachable!(),
    }

    Ok(())
}

async fn config_edit() -> Result<()> {
    use dialoguer::{theme::ColorfulTheme, Input};

    println!("{}", "🔧 Configuration Editor".cyan().bold());

    let current = Config::load()?.unwrap_or_default();

    let generator: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Generator command")
        .default(current.generator.clone())
        .interact_text()?;

    let template: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Prompt template path")
        .default(current.template.display().to_string())
        .interact_text()?;

    let timeout_secs: u64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Generation timeout (seconds)")
        .default(current.timeout_secs)
        .interact_text()?;

    let config = Config {
        generator,
        template: PathBuf::from(template),
        timeout_secs,
    };

    config.save()?;
    println!("{}", "✅ Configuration updated successfully!".green().bold());

    Ok(())
}

async fn config_show() -> Result<()> {
    println!("{}", "📋 Current Configuration".cyan().bold());

    match Config::load()? {
        Some(config) => {
            println!("Generator: {}", config.generator.green());
            println!("Template:  {}", config.template.display().to_string().green());
            println!("Timeout:   {}s", config.timeout_secs.to_string().green());

            let config_path = Config::get_config_file_path()?;
            println!(
                "Config file: {}",
                config_path.display().to_string().yellow()
            );
        }
        None => {
            println!(
                "{}",
                "No configuration found. Run 'renamile config edit' to create one.".yellow()
            );
        }
    }

    Ok(())
}

async fn config_reset() -> Result<()> {
    use dialoguer::{theme::ColorfulTheme, Confirm};

    let config_path = Config::get_config_file_path()?;

    if !config_path.exists() {
        println!("{}", "No configuration file found.".yellow());
        return Ok(());
    }

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Are you sure you want to reset the configuration?")
        .default(false)
        .interact()?;

    if confirmed {
        std::fs::remove_file(&config_path)?;
        println!("{}", "✅ Configuration reset successfully!".green().bold());
        println!("Built-in defaults apply until you run 'renamile config edit' again.");
    } else {
        println!("Configuration reset cancelled.");
    }

    Ok(())
}
