use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use textcleaner::{
    DiffAlgorithm, DiffAlgorithmType, Differ, EditSession, HtmlRenderer, JsonFileStore, MarkedPair,
    PlainRenderer, Range, Replacement, RuleHistory, RuleSet, SessionOptions,
};
use textcleaner::differ::DEFAULT_MAX_TABLE_CELLS;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Strip spans, replace words and compare chat messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply range and replacement rules to a text file
    Apply {
        /// The text to clean
        #[arg(short, long)]
        input: PathBuf,

        /// A JSON rule preset ({"ranges": [...], "replacements": [...]})
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Delete everything from START to the next END, markers included
        #[arg(long = "range", num_args = 2, value_names = ["START", "END"])]
        ranges: Vec<String>,

        /// Replace every FIND with REPLACE
        #[arg(long = "replace", num_args = 2, value_names = ["FIND", "REPLACE"])]
        replacements: Vec<String>,

        /// The output file (defaults to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep leading and trailing whitespace
        #[arg(long, default_value_t = false)]
        no_trim: bool,

        /// Record the used rules in this history file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Save the result as the translation of the input in this store
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Compare two texts character by character
    Diff {
        /// The original text
        #[arg(short = 'i', long)]
        old: PathBuf,

        /// The edited text
        #[arg(short, long)]
        new: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Alignment algorithm
        #[arg(short, long, value_enum, default_value_t = Algorithm::Lcs)]
        algorithm: Algorithm,

        /// Number of semantic cleanup passes
        #[arg(short, long, default_value_t = 3)]
        passes: usize,

        /// The output file (defaults to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or edit the rule history
    History {
        /// The history file
        #[arg(short, long)]
        file: PathBuf,

        /// Remove the entry at this index
        #[arg(short, long)]
        remove: Option<usize>,

        /// Remove all entries
        #[arg(long, default_value_t = false)]
        clear: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Plain,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Algorithm {
    Lcs,
    Similar,
}

impl From<Algorithm> for DiffAlgorithmType {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Lcs => DiffAlgorithmType::Lcs,
            Algorithm::Similar => DiffAlgorithmType::Similar,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            input,
            rules,
            ranges,
            replacements,
            output,
            no_trim,
            history,
            store,
        } => {
            let content = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let mut rule_set = match rules {
                Some(path) => RuleSet::load(&path)
                    .with_context(|| format!("loading rules from {}", path.display()))?,
                None => RuleSet::default(),
            };
            rule_set.extend(RuleSet::new(
                ranges
                    .chunks(2)
                    .map(|pair| Range::new(pair[0].as_str(), pair[1].as_str()))
                    .collect(),
                replacements
                    .chunks(2)
                    .map(|pair| Replacement::new(pair[0].as_str(), pair[1].as_str()))
                    .collect(),
            ));
            if rule_set.is_empty() {
                bail!("no rules given: pass --rules, --range or --replace");
            }

            let options = SessionOptions {
                trim: !no_trim,
                ..SessionOptions::default()
            };
            let mut session = EditSession::with_options(&content, options);
            session.process(&rule_set.ranges, &rule_set.replacements);

            if let Some(path) = history {
                let mut rule_history = RuleHistory::load(&path)?;
                session.commit(&mut rule_history, &rule_set.ranges, &rule_set.replacements);
                rule_history.save(&path)?;
                info!(entries = rule_history.len(), "updated history");
            }

            if let Some(path) = store {
                let mut translations = JsonFileStore::open(&path)?;
                session.commit_translation(&mut translations)?;
            }

            write_output(output, session.current())?;
        }

        Commands::Diff {
            old,
            new,
            format,
            algorithm,
            passes,
            output,
        } => {
            let old_content = fs::read_to_string(&old)?;
            let new_content = fs::read_to_string(&new)?;

            let differ = Differ::new_with_algorithm(&old_content, &new_content, algorithm.into())
                .cleanup_passes(passes)
                .fallback_above(DEFAULT_MAX_TABLE_CELLS);

            let result = match format {
                Format::Json => serde_json::to_string_pretty(&differ.align())?,
                Format::Html => side_by_side(&differ.render(&HtmlRenderer::default())),
                Format::Plain => side_by_side(&differ.render(&PlainRenderer::default())),
            };
            write_output(output, &result)?;
        }

        Commands::History {
            file,
            remove,
            clear,
        } => {
            let mut rule_history = RuleHistory::load(&file)?;

            if clear {
                rule_history.clear();
                rule_history.save(&file)?;
            } else if let Some(index) = remove {
                let entry = rule_history.remove(index)?;
                rule_history.save(&file)?;
                println!("Removed: {}", entry);
            }

            for (index, entry) in rule_history.entries().enumerate() {
                println!("{:>2}  {}", index, entry);
            }
        }
    }

    Ok(())
}

fn side_by_side(pair: &MarkedPair) -> String {
    format!("--- original\n{}\n+++ modified\n{}", pair.old, pair.new)
}

fn write_output(output: Option<PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)?,
        None => println!("{}", content),
    }
    Ok(())
}
