use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use voice_ideas_core::config::{Config, OutputFormat};
use voice_ideas_core::{
    AnalysisResult, Category, EntryLoader, IdeaRecord, Result, Status, VoiceEntry,
    VoiceIdeasError,
};

mod args;
use args::{CategoryFilter, Cli, Commands, ConfigAction, Format, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);
    debug!(base_dir = %base_dir.display(), "resolved base directory");

    let result = match cli.command {
        Some(Commands::Analyze {
            file,
            format,
            top,
            category,
        }) => handle_analyze(&base_dir, &file, format, top, category),
        Some(Commands::Tags { file, limit }) => handle_tags(&base_dir, &file, limit),
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

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
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
    generate(shell, &mut cmd, "voice-ideas", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("VOICE_IDEAS_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".voice-ideas"))
        .unwrap_or_else(|| PathBuf::from(".voice-ideas"))
}

/// Read entries from a CSV path, or stdin for "-"
fn load_entries(config: &Config, file: &Path) -> Result<Vec<VoiceEntry>> {
    let loader = EntryLoader::new(config.ingest.clone());
    if file == Path::new("-") {
        loader.load_reader(io::stdin().lock())
    } else {
        loader.load_path(file)
    }
}

fn handle_analyze(
    base_dir: &Path,
    file: &Path,
    format: Option<Format>,
    top: Option<usize>,
    category: Option<CategoryFilter>,
) -> Result<()> {
    let config = Config::load(base_dir)?;
    let entries = load_entries(&config, file)?;
    let result = filter_ideas(
        voice_ideas_core::analyze(&entries),
        category.map(to_category),
    );

    let format = match format {
        Some(Format::Text) => OutputFormat::Text,
        Some(Format::Json) => OutputFormat::Json,
        None => config.output.format,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            print_report(&result, top.unwrap_or(config.output.top_tags));
        }
    }

    Ok(())
}

fn to_category(filter: CategoryFilter) -> Category {
    match filter {
        CategoryFilter::General => Category::General,
        CategoryFilter::Health => Category::Health,
        CategoryFilter::Learning => Category::Learning,
        CategoryFilter::Work => Category::Work,
        CategoryFilter::Personal => Category::Personal,
    }
}

/// Narrow the reported ideas; the summary keeps the unfiltered count
fn filter_ideas(result: AnalysisResult, category: Option<Category>) -> AnalysisResult {
    match category {
        Some(category) => result.with_category(category),
        None => result,
    }
}

fn handle_tags(base_dir: &Path, file: &Path, limit: Option<usize>) -> Result<()> {
    let config = Config::load(base_dir)?;
    let entries = load_entries(&config, file)?;
    let result = voice_ideas_core::analyze(&entries);

    let limit = limit.unwrap_or(result.tag_counts.len());
    let tags = result.top_tags(limit);

    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    let width = tags.iter().map(|(tag, _)| tag.len()).max().unwrap_or(0);
    for (tag, count) in tags {
        println!("{}  {}", format!("{:<width$}", tag, width = width).cyan(), count);
    }

    Ok(())
}

fn print_report(result: &AnalysisResult, top_tags: usize) {
    println!();
    println!("{}", result.summary.bold());
    println!();

    let tags = result.top_tags(top_tags);
    if !tags.is_empty() {
        println!("{}", "Tags:".green());
        for (tag, count) in tags {
            println!("  {} {}", tag.cyan(), format!("({})", count).dimmed());
        }
        println!();
    }

    if result.ideas.is_empty() {
        println!("No ideas found.");
        println!();
        return;
    }

    let statuses = result.status_counts();
    println!(
        "{} {} new, {} in progress, {} completed",
        "Ideas:".green(),
        statuses.get(&Status::New).unwrap_or(&0),
        statuses.get(&Status::InProgress).unwrap_or(&0),
        statuses.get(&Status::Completed).unwrap_or(&0)
    );
    for (i, idea) in result.ideas.iter().enumerate() {
        print_idea(i + 1, idea);
    }
}

fn print_idea(index: usize, idea: &IdeaRecord) {
    println!("  {}. {}", index, idea.task_text.bold());
    println!(
        "     {} {}  {} {}  {} {}",
        "status:".dimmed(),
        idea.status,
        "category:".dimmed(),
        idea.category.to_string().cyan(),
        "due:".dimmed(),
        idea.due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!(
        "     {} {}  {} {}  {} {}  {} {}",
        "origin:".dimmed(),
        idea.origin_type,
        "tone:".dimmed(),
        idea.tone,
        "refinement:".dimmed(),
        idea.refinement_level,
        "belief:".dimmed(),
        idea.belief_level
    );
    println!();
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(VoiceIdeasError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
