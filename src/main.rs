use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use docbrand::corpus::{self, DocKind, KindFilter};
use docbrand::engine::{Pipeline, ReplacementMode};
use docbrand::output::{self, write_if_changed, WriteOutcome};
use docbrand::rules::{derive_article_rules, load_from_path, ReplacementRule, RuleTables};
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "docbrand")]
#[command(about = "Terminology rebranding for documentation trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the rule tables to all documents under a root
    Apply {
        /// Root directory to process (DOCBRAND_ROOT if not specified)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Rule tables file (defaults to <root>/rules.toml, then ./rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Which document kinds to process
        #[arg(short, long, value_enum, default_value_t = KindArg::All)]
        kind: KindArg,

        /// Dry run - show what would change without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Report which documents would change, without writing anything
    Check {
        /// Root directory to process (DOCBRAND_ROOT if not specified)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Rule tables file (defaults to <root>/rules.toml, then ./rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Which document kinds to process
        #[arg(short, long, value_enum, default_value_t = KindArg::All)]
        kind: KindArg,
    },

    /// Summarize the loaded rule tables
    List {
        /// Rule tables file (defaults to ./rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Derive article cleanup rules (an X -> a X) from the compound table
    /// and append the missing ones to the rule tables file
    SyncArticles {
        /// Rule tables file (defaults to ./rules.toml)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Show the derived rules without updating the file
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Md,
    Yaml,
    All,
}

impl From<KindArg> for KindFilter {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Md => KindFilter::Markdown,
            KindArg::Yaml => KindFilter::Yaml,
            KindArg::All => KindFilter::All,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            root,
            rules,
            kind,
            dry_run,
            diff,
        } => cmd_apply(root, rules, kind.into(), dry_run, diff),

        Commands::Check { root, rules, kind } => cmd_check(root, rules, kind.into()),

        Commands::List { rules } => cmd_list(rules),

        Commands::SyncArticles { rules, dry_run } => cmd_sync_articles(rules, dry_run),
    }
}

/// Resolve the corpus root.
///
/// Priority order:
/// 1. Explicit --root flag
/// 2. DOCBRAND_ROOT environment variable
fn resolve_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_root {
        return Ok(path.canonicalize()?);
    }

    if let Ok(env_path) = env::var("DOCBRAND_ROOT") {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path.canonicalize()?);
        }
        anyhow::bail!("DOCBRAND_ROOT is set but path does not exist: {env_path}");
    }

    anyhow::bail!(
        "{}\n{}\n  {}\n  {}",
        "No corpus root specified.".red(),
        "Try one of:".bold(),
        "1. Pass it explicitly: docbrand apply --root /path/to/docs",
        "2. Set the environment variable: export DOCBRAND_ROOT=/path/to/docs"
    )
}

/// Resolve the rule tables file: explicit flag, then <root>/rules.toml,
/// then ./rules.toml relative to the current directory.
fn resolve_rules_file(cli_rules: Option<PathBuf>, root: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = cli_rules {
        return Ok(path);
    }

    let mut candidates = Vec::new();
    if let Some(root) = root {
        candidates.push(root.join("rules.toml"));
    }
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join("rules.toml"));
    }

    for candidate in &candidates {
        if candidate.exists() {
            return Ok(candidate.clone());
        }
    }

    anyhow::bail!("No rules.toml found; pass one with --rules")
}

fn mode_for(kind: DocKind) -> ReplacementMode {
    match kind {
        DocKind::Markdown => ReplacementMode::FirstMention,
        DocKind::Yaml => ReplacementMode::Uniform,
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

struct RunTotals {
    scanned: usize,
    modified: usize,
    unchanged: usize,
    skipped: usize,
}

fn run_pipeline(
    root: &Path,
    tables: &RuleTables,
    filter: KindFilter,
    dry_run: bool,
    show_diff: bool,
) -> Result<RunTotals> {
    let documents = corpus::discover(root, filter, &tables.skip_folders)?;
    println!("Found {} files to process", documents.len());

    let pipeline = Pipeline::new(tables);
    let bar = progress_bar(documents.len() as u64);

    let mut totals = RunTotals {
        scanned: 0,
        modified: 0,
        unchanged: 0,
        skipped: 0,
    };

    for (path, kind) in &documents {
        bar.inc(1);
        totals.scanned += 1;

        // Decode failures skip the document, never the batch.
        let original = match corpus::read_document(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("skipping document: {e}");
                bar.suspend(|| eprintln!("{} {}: skipped ({})", "⊘".cyan(), path.display(), e));
                totals.skipped += 1;
                continue;
            }
        };

        let rebranded = pipeline.apply(&original, mode_for(*kind));

        if rebranded == original {
            totals.unchanged += 1;
            continue;
        }

        if show_diff {
            bar.suspend(|| print!("{}", output::render_diff(path, &original, &rebranded)));
        }

        if dry_run {
            bar.suspend(|| {
                println!("{} {}: would modify", "✓".green(), path.display());
            });
            totals.modified += 1;
            continue;
        }

        match write_if_changed(path, &original, &rebranded) {
            Ok(WriteOutcome::Written) => {
                totals.modified += 1;
            }
            Ok(WriteOutcome::Unchanged) => {
                totals.unchanged += 1;
            }
            Err(e) => {
                bar.suspend(|| {
                    eprintln!("{} {}: write failed ({})", "✗".red(), path.display(), e)
                });
                totals.skipped += 1;
            }
        }
    }

    bar.finish_and_clear();
    Ok(totals)
}

fn print_summary(totals: &RunTotals, dry_run: bool) {
    println!();
    println!("{}", "Summary:".bold());
    println!("  {} scanned", format!("{}", totals.scanned).bold());
    if dry_run {
        println!(
            "  {} would be modified",
            format!("{}", totals.modified).green()
        );
    } else {
        println!("  {} modified", format!("{}", totals.modified).green());
    }
    println!("  {} unchanged", format!("{}", totals.unchanged).dimmed());
    println!("  {} skipped", format!("{}", totals.skipped).yellow());
}

fn cmd_apply(
    root: Option<PathBuf>,
    rules: Option<PathBuf>,
    filter: KindFilter,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let root = resolve_root(root)?;
    let rules_file = resolve_rules_file(rules, Some(&root))?;

    // Rule-table problems are fatal before any document is touched.
    let tables = load_from_path(&rules_file)?;

    println!("Root: {}", root.display());
    println!("Rules: {}", rules_file.display());
    if dry_run {
        println!("{}", "[DRY RUN - no files will be modified]".cyan());
    }
    println!();

    let totals = run_pipeline(&root, &tables, filter, dry_run, show_diff)?;
    print_summary(&totals, dry_run);

    Ok(())
}

fn cmd_check(root: Option<PathBuf>, rules: Option<PathBuf>, filter: KindFilter) -> Result<()> {
    let root = resolve_root(root)?;
    let rules_file = resolve_rules_file(rules, Some(&root))?;
    let tables = load_from_path(&rules_file)?;

    println!("{}", "Rebranding check (read-only)".bold());
    println!("Root: {}", root.display());
    println!("Rules: {}", rules_file.display());
    println!();

    let totals = run_pipeline(&root, &tables, filter, true, false)?;
    print_summary(&totals, true);

    if totals.modified > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_list(rules: Option<PathBuf>) -> Result<()> {
    let rules_file = resolve_rules_file(rules, None)?;
    let tables = load_from_path(&rules_file)?;

    println!("{}", format!("Rule tables: {}", rules_file.display()).bold());
    println!();

    println!(
        "{} ({} rules)",
        "FIRST MENTION".green().bold(),
        tables.first_mention.len()
    );
    for rule in &tables.first_mention {
        println!("  {} -> {} (then {})", rule.term, rule.first, rule.subsequent);
    }
    println!();

    println!(
        "{} ({} rules)",
        "COMPOUND".green().bold(),
        tables.compound.len()
    );
    for rule in &tables.compound {
        println!("  {} -> {}", rule.search, rule.replace);
    }
    println!();

    println!(
        "{} ({} rules)",
        "CLEANUP".green().bold(),
        tables.cleanup.len()
    );
    for rule in &tables.cleanup {
        println!("  {} -> {}", rule.search, rule.replace);
    }
    println!();

    println!(
        "{} ({} terms)",
        "PROTECTED".yellow().bold(),
        tables.protected.len()
    );
    for term in &tables.protected {
        println!("  {}", term);
    }

    if !tables.skip_folders.is_empty() {
        println!();
        println!(
            "{} ({} folders)",
            "SKIPPED FOLDERS".cyan().bold(),
            tables.skip_folders.len()
        );
        for folder in &tables.skip_folders {
            println!("  {}", folder);
        }
    }

    Ok(())
}

fn cmd_sync_articles(rules: Option<PathBuf>, dry_run: bool) -> Result<()> {
    let rules_file = resolve_rules_file(rules, None)?;
    let tables = load_from_path(&rules_file)?;

    let derived = derive_article_rules(&tables);
    if derived.is_empty() {
        println!("All article cleanup rules already present");
        return Ok(());
    }

    println!(
        "{}",
        format!("{} article cleanup rules to add:", derived.len()).bold()
    );
    for rule in &derived {
        println!("  {} -> {}", rule.search, rule.replace);
    }

    if dry_run {
        println!("{}", "[DRY RUN - rule tables not updated]".cyan());
        return Ok(());
    }

    let original = std::fs::read_to_string(&rules_file)?;
    let updated = append_cleanup_rules(&original, &derived)?;
    if write_if_changed(&rules_file, &original, &updated)? == WriteOutcome::Written {
        println!("Updated {}", rules_file.display());
    }
    Ok(())
}

/// Append rules to the `[[cleanup]]` array of the rule-table document,
/// preserving the file's existing formatting and comments.
fn append_cleanup_rules(contents: &str, rules: &[ReplacementRule]) -> Result<String> {
    let mut doc = contents
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| anyhow::anyhow!("failed to parse rule tables: {e}"))?;

    let item = doc
        .entry("cleanup")
        .or_insert(toml_edit::Item::ArrayOfTables(
            toml_edit::ArrayOfTables::new(),
        ));
    let Some(cleanup) = item.as_array_of_tables_mut() else {
        anyhow::bail!("`cleanup` is not an array of tables");
    };

    for rule in rules {
        let mut table = toml_edit::Table::new();
        table["search"] = toml_edit::value(rule.search.clone());
        table["replace"] = toml_edit::value(rule.replace.clone());
        cleanup.push(table);
    }

    Ok(doc.to_string())
}
