use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use ftassoc_core::{AssocError, LoadedRules, Result, RulesConfig};

mod args;
use args::{Cli, Commands, ConfigAction, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_dir = resolve_base_dir(cli.base_dir);

    let result = match cli.command {
        Some(Commands::Classify { names }) => handle_classify(&base_dir, &names),
        Some(Commands::Scan { path, unmatched }) => handle_scan(&base_dir, &path, unmatched),
        Some(Commands::List { file_type }) => handle_list(&base_dir, file_type.as_deref()),
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "ftassoc", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("FTASSOC_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".ftassoc"))
        .unwrap_or_else(|| PathBuf::from(".ftassoc"))
}

fn load_rules(base_dir: &Path) -> Result<LoadedRules> {
    RulesConfig::load(base_dir)?.build()
}

fn handle_classify(base_dir: &Path, names: &[String]) -> Result<()> {
    let rules = load_rules(base_dir)?;
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

    for name in names {
        match rules.table.find_by_name(final_segment(name)) {
            Some(file_type) => println!("{:width$}  {}", name, file_type.name().green()),
            None => println!("{:width$}  {}", name, "(none)".dimmed()),
        }
    }

    Ok(())
}

/// Last path segment of a command-line argument, split on `/` and `\`.
fn final_segment(arg: &str) -> &str {
    arg.rsplit(['/', '\\']).next().unwrap_or(arg)
}

fn handle_scan(base_dir: &Path, root: &Path, unmatched_only: bool) -> Result<()> {
    if !root.is_dir() {
        return Err(AssocError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let rules = load_rules(base_dir)?;
    debug!(root = %root.display(), "scanning directory");
    let mut total = 0usize;
    let mut unmatched = 0usize;

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        total += 1;

        let name = entry.file_name().to_string_lossy();
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        match rules.table.find_by_name(&name) {
            Some(file_type) if !unmatched_only => {
                println!("{}  {}", file_type.name().green(), rel.display());
            }
            Some(_) => {}
            None => {
                unmatched += 1;
                println!("{}  {}", "(none)".dimmed(), rel.display());
            }
        }
    }

    println!();
    println!(
        "{} {} files, {} without a file type",
        "Scanned:".cyan(),
        total,
        unmatched
    );
    Ok(())
}

fn handle_list(base_dir: &Path, only: Option<&str>) -> Result<()> {
    let rules = load_rules(base_dir)?;
    let selected = match only {
        Some(name) => vec![rules.file_type(name)?],
        None => rules.file_types.iter().collect(),
    };

    if selected.is_empty() {
        println!("No file types declared.");
        println!();
        println!("Create a rules file with: ftassoc config init");
        return Ok(());
    }

    println!();
    for file_type in selected {
        let matchers = rules.table.associations_for(file_type);
        if matchers.is_empty() {
            println!("{} {}", file_type.name().bold(), "(no patterns)".dimmed());
            continue;
        }
        let generic = matchers.iter().filter(|m| !m.is_extension()).count();
        let mut patterns: Vec<String> = matchers.iter().map(|m| m.presentable()).collect();
        // Extension order comes from a hash map; keep the output stable.
        patterns[generic..].sort();
        println!("{} {}", file_type.name().bold(), patterns.join(", "));
    }
    println!();

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = RulesConfig::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = RulesConfig::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
        ConfigAction::Show => {
            let config = RulesConfig::load(base_dir)?;
            println!();
            for entry in &config.file_types {
                println!("{} = {} patterns", entry.name.cyan(), entry.patterns.len());
            }
            println!();
        }
    }

    Ok(())
}
