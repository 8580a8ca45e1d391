use clap::{Parser, ValueEnum};
use schemafix::catalog::parse_catalog;
use schemafix::{
    RewriteOptions, RewriteReport, RuleCatalog, SchemaRewriter, CONFIRMATION_MESSAGE,
    DEFAULT_SCHEMA_PATH,
};
use std::path::PathBuf;
use std::process;

/// fix-schema — strip enum declarations from a Prisma schema and retype their fields as String
#[derive(Parser)]
#[command(name = "fix-schema", version, about)]
struct Cli {
    /// Schema file to rewrite in place
    #[arg(default_value = DEFAULT_SCHEMA_PATH)]
    path: PathBuf,

    /// YAML rule catalog to use instead of the built-in one
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Show what would change without writing the file
    #[arg(long)]
    dry_run: bool,

    /// Print the change report after writing
    #[arg(long)]
    report: bool,

    /// Report format
    #[arg(long, default_value = "yaml")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("ERROR:{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match &cli.rules {
        Some(path) => {
            log::info!("Loading rule catalog from {}", path.display());
            parse_catalog(path)?
        }
        None => RuleCatalog::builtin(),
    };
    let rewriter = SchemaRewriter::new(&catalog)?;

    let report = rewriter.rewrite_file(
        &cli.path,
        RewriteOptions {
            dry_run: cli.dry_run,
        },
    )?;

    if cli.dry_run {
        print_report(&report, &cli.format)?;
        return Ok(());
    }

    if cli.report {
        print_report(&report, &cli.format)?;
    }
    println!("{CONFIRMATION_MESSAGE}");

    Ok(())
}

fn print_report(
    report: &RewriteReport,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = report.to_value();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&value)?),
    }
    Ok(())
}
