#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(
    name = "java2jsonschema",
    about = "Generate JSON Schema documents from a Java class model"
)]
struct Cli {
    /// Root directory scanned recursively for .java sources
    #[arg(value_name = "SOURCE_ROOT")]
    source_root: std::path::PathBuf,

    /// Directory the schema documents are written to
    #[arg(value_name = "OUT_DIR", default_value = "schemas")]
    out_dir: std::path::PathBuf,

    /// Field name to drop from every generated schema; repeatable.
    /// Replaces the built-in exclusion set when given.
    #[arg(long, value_name = "FIELD")]
    exclude: Vec<String>,
}

#[cfg(feature = "cli")]
fn main() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = java2jsonschema::generator::GeneratorConfig::default();
    if !cli.exclude.is_empty() {
        config.excluded_fields = cli.exclude;
    }

    let registry = match java2jsonschema::registry::TypeRegistry::scan(&cli.source_root) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match java2jsonschema::generator::generate_all(&registry, &cli.out_dir, &config) {
        Ok(summary) => {
            println!(
                "done. {} schemas written, {} failed.",
                summary.written, summary.failed
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary is only available with the `cli` feature enabled.");
    std::process::exit(1);
}
