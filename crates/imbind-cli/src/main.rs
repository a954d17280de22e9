use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use imbind_core::{BindingConfig, IrDocument, LinkTarget};

#[derive(Parser)]
#[command(name = "imbind")]
#[command(about = "imbind - Odin bindings for Dear ImGui from dear_bindings JSON")]
#[command(version = "0.1.0")]
#[command(author = "Gianluca Brigandi <gbrigand@gmail.com>")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the binding source from a dear_bindings JSON file.
    Generate {
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Fail on array bounds that cannot be resolved.
        #[arg(long)]
        strict: bool,

        /// Render enum groups in parallel.
        #[arg(long)]
        parallel: bool,
    },

    /// Print the default configuration as JSON.
    Config,

    /// Print the library artifact name for this platform.
    LibName {
        #[arg(long, default_value = "imgui")]
        library: String,
    },

    /// Generate the helper file listing compiled-in backends.
    Backends {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarise a dear_bindings JSON file.
    Inspect {
        input: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            strict,
            parallel,
        } => cmd_generate(input, output, config, strict, parallel, cli.verbose),
        Commands::Config => cmd_config(),
        Commands::LibName { library } => cmd_lib_name(&library),
        Commands::Backends { output, config } => cmd_backends(output, config),
        Commands::Inspect { input, config } => cmd_inspect(input, config),
    }
}

/// Diagnostics go to stderr so generated source on stdout stays clean. `RUST_LOG` wins unless
/// `-v` was given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<BindingConfig> {
    match path {
        Some(path) => BindingConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(BindingConfig::default()),
    }
}

fn load_document(path: &Path) -> Result<IrDocument> {
    debug!(path = %path.display(), "Loading dear_bindings JSON");
    IrDocument::from_file(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn cmd_generate(
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    strict: bool,
    parallel: bool,
    verbose: bool,
) -> Result<()> {
    use colored::*;
    use std::fs;
    use std::time::Instant;

    let config = load_config(config.as_deref())?;
    let strict = strict || config.strict_bounds;
    let parallel = parallel || config.parallel;
    let config = config.with_strict_bounds(strict).with_parallel(parallel);

    if verbose {
        eprintln!("{}", " imbind".bright_blue().bold());
        eprintln!("{}", "=".repeat(50).bright_blue());
        eprintln!(" Input: {}", input.display());
        if let Some(ref out) = output {
            eprintln!(" Output: {}", out.display());
        }
        eprintln!(" Package: {}", config.package);
        eprintln!();
    }

    let start = Instant::now();
    let document = load_document(&input)?;
    // Rendered in full before anything touches the output path.
    let source = imbind_emit::generate(&document, &config)
        .with_context(|| format!("Failed to generate bindings for {}", input.display()))?;

    match output {
        Some(output_path) => {
            fs::write(&output_path, &source)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            if verbose {
                eprintln!(
                    "\n {} Bindings generated!",
                    "SUCCESS:".bright_green().bold()
                );
                eprintln!("   Time: {:.3}s", start.elapsed().as_secs_f64());
                eprintln!("   Output: {}", output_path.display());
            }
        }
        None => print!("{}", source),
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    println!("{}", BindingConfig::default().to_json_pretty()?);
    Ok(())
}

fn cmd_lib_name(library: &str) -> Result<()> {
    let target = LinkTarget::host().context("Unsupported host platform")?;
    println!("{}", target.artifact_name(library));
    Ok(())
}

fn cmd_backends(output: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    use colored::*;
    use std::fs;

    let config = load_config(config.as_deref())?;
    let manifest =
        imbind_emit::emit_backend_manifest(&config.package, &config.backends, &config.wanted_backends)?;

    match output {
        Some(output_path) => {
            fs::write(&output_path, &manifest)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            println!(
                " {} Backend manifest saved to: {}",
                "SUCCESS:".bright_green().bold(),
                output_path.display()
            );
        }
        None => print!("{}", manifest),
    }

    Ok(())
}

fn cmd_inspect(input: PathBuf, config: Option<PathBuf>) -> Result<()> {
    use colored::*;
    use imbind_transform::{classify, EnumClass, EnumNaming};

    let config = load_config(config.as_deref())?;
    let document = load_document(&input)?;

    println!("{}", format!(" {}", input.display()).bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_cyan());
    println!("Defines:   {}", document.defines.len());
    println!("Enums:     {}", document.enums.len());
    println!("Structs:   {}", document.structs.len());
    println!("Functions: {}", document.functions.len());
    println!("Typedefs:  {}", document.typedefs.len());

    if document.enums.is_empty() {
        return Ok(());
    }

    println!("\n{}", " Enum groups".bright_yellow());
    for group in &document.enums {
        let name = EnumNaming::new(&group.name, &config).name;
        let class = match classify(group, &config) {
            EnumClass::Skip => "skip".dimmed(),
            EnumClass::Flags => "flags".bright_green(),
            EnumClass::Constants => "constants".yellow(),
            EnumClass::Plain { stop_after: None } => "plain".normal(),
            EnumClass::Plain { stop_after: Some(_) } => "plain, truncated".bright_red(),
        };
        println!(
            "   {:<32} {:<10} {} elements",
            name,
            class,
            group.elements.len()
        );
    }

    Ok(())
}
