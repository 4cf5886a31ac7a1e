use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use mock_data::{
    DEFAULT_SEED, DistributedRequest, DistributedTable, GenerationRequest, GeneratorConfig,
    LocalSessionFactory, MockMovielens, SessionConfig, SessionFactory, Table, staging_file_name,
    write_csv, write_csv_to,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// mock-movielens - synthetic MovieLens-like rating tables
#[derive(Parser)]
#[command(name = "mock-movielens")]
#[command(about = "Generate mock MovieLens tables for testing recommenders", long_about = None)]
struct Cli {
    /// JSON file overriding the value domains of generated columns
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SeedArgs {
    /// Seed for the pseudo-random stream
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,

    /// Draw a fresh seed instead of --seed (it is printed for reuse)
    #[arg(long, conflicts_with = "seed")]
    random_seed: bool,
}

impl SeedArgs {
    fn resolve(&self) -> i64 {
        if self.random_seed {
            let seed = rand::random::<i64>();
            println!("{} Using seed {}", "•".cyan(), seed);
            seed
        } else {
            self.seed
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a local table and write it as CSV
    Generate {
        /// Number of rows
        #[arg(long, default_value = "3")]
        size: usize,

        #[command(flatten)]
        seed: SeedArgs,

        /// Keep only the first N columns of the default header (1-4); title and
        /// genre still follow --no-title / --no-genre
        #[arg(long, allow_negative_numbers = true)]
        keep_first_n_cols: Option<i64>,

        /// Drop the title column
        #[arg(long)]
        no_title: bool,

        /// Drop the genre column
        #[arg(long)]
        no_genre: bool,

        /// Output file; prints a preview when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rows shown in the preview
        #[arg(long, default_value = "10")]
        preview: usize,
    },

    /// Generate a table and load it through a local session via a staging file
    Stage {
        /// Number of rows
        #[arg(long, default_value = "3")]
        size: usize,

        #[command(flatten)]
        seed: SeedArgs,

        /// Drop the title column
        #[arg(long)]
        no_title: bool,

        /// Drop the genre column
        #[arg(long)]
        no_genre: bool,

        /// Directory that keeps the staging file
        #[arg(long)]
        staging_dir: PathBuf,

        /// JSON file with session settings (app_name, partitions)
        #[arg(long)]
        session_config: Option<PathBuf>,

        /// Session name, overrides the session config
        #[arg(long)]
        app_name: Option<String>,

        /// Partitions of the loaded table, overrides the session config
        #[arg(long)]
        partitions: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let generator = match &cli.config {
        Some(path) => {
            let config = GeneratorConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            MockMovielens::with_config(config).context("Invalid generator config")?
        }
        None => MockMovielens::new(),
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Generate {
            size,
            seed,
            keep_first_n_cols,
            no_title,
            no_genre,
            output,
            preview,
        } => {
            let mut request = GenerationRequest::new(size)
                .with_seed(seed.resolve())
                .keep_title_col(!no_title)
                .keep_genre_col(!no_genre);
            request.keep_first_n_cols = keep_first_n_cols;
            handle_generate(&generator, &request, output, preview)?
        }
        Commands::Stage {
            size,
            seed,
            no_title,
            no_genre,
            staging_dir,
            session_config,
            app_name,
            partitions,
        } => {
            let request = DistributedRequest::new(size)
                .with_seed(seed.resolve())
                .keep_title_col(!no_title)
                .keep_genre_col(!no_genre)
                .staging_dir(staging_dir);
            let mut config = match &session_config {
                Some(path) => SessionConfig::from_json_file(path).with_context(|| {
                    format!("Failed to read session config {}", path.display())
                })?,
                None => SessionConfig::default(),
            };
            if let Some(name) = app_name {
                config = config.with_app_name(name);
            }
            if let Some(partitions) = partitions {
                config = config.with_partitions(partitions);
            }
            handle_stage(&generator, &request, config)?
        }
    }

    Ok(())
}

/// Handle the 'generate' command
fn handle_generate(
    generator: &MockMovielens,
    request: &GenerationRequest,
    output: Option<PathBuf>,
    preview: usize,
) -> Result<()> {
    let start = Instant::now();
    let table = generator
        .get_df(request)
        .context("Failed to generate table")?;
    info!(
        "Generated {} rows x {} columns in {:?}",
        table.num_rows(),
        table.num_columns(),
        start.elapsed()
    );

    match output {
        Some(path) => {
            write_csv(&table, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} rows to {}",
                "✓".green(),
                table.num_rows(),
                path.display()
            );
        }
        None => print_preview(&table, preview)?,
    }
    Ok(())
}

/// Handle the 'stage' command
fn handle_stage(
    generator: &MockMovielens,
    request: &DistributedRequest,
    config: SessionConfig,
) -> Result<()> {
    let factory = LocalSessionFactory::new(config);
    let session = factory.session().context("Failed to start session")?;

    let start = Instant::now();
    let table = generator
        .get_distributed_df(&session, request)
        .context("Failed to stage table")?;
    session.stop();

    println!("{}", "Staged table:".bold().blue());
    println!("{}Session: {}", "• ".green(), session.config().app_name);
    println!("{}Rows: {}", "• ".green(), table.count());
    println!("{}Partitions: {}", "• ".green(), table.num_partitions());
    println!("{}Schema:", "• ".green());
    for field in table.schema() {
        println!("    {}: {}", field.name, field.column_type);
    }
    if let Some(dir) = &request.staging_dir {
        println!(
            "{}Staging file: {}",
            "• ".cyan(),
            dir.join(staging_file_name(request.size)).display()
        );
    }
    println!("{} Done in {:?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Print the header and the first `rows` rows as CSV
fn print_preview(table: &Table, rows: usize) -> Result<()> {
    println!(
        "{}",
        format!(
            "Mock MovieLens table ({} rows, columns: {}):",
            table.num_rows(),
            table.column_names().join(", ")
        )
        .bold()
        .blue()
    );
    let head = table.slice(0, rows);
    write_csv_to(&head, std::io::stdout().lock()).context("Failed to print preview")?;
    if table.num_rows() > rows {
        println!("... {} more rows", table.num_rows() - rows);
    }
    Ok(())
}
