//! atlas-render: CLI tool to render chat answers

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use atlas_render_core::{AnswerPayload, OutputFormat, RenderOptions, render_to_string};
use config::{CONFIG_FILE_NAME, Config};

/// Extensions picked up when rendering a directory
const INPUT_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "json"];

#[derive(Parser, Debug)]
#[command(name = "atlas-render")]
#[command(about = "Render chat answers to HTML, plain text or JSON")]
#[command(version)]
#[command(after_help = "Examples:
  atlas-render answer.md                  # Render to answer.html
  atlas-render answer.md -f text          # Render to answer.txt
  atlas-render response.json              # Render the answer of a service payload
  atlas-render answers/ -o site/ -r -j4   # Render a directory with 4 parallel jobs
  cat answer.md | atlas-render - -f text  # Render stdin to stdout")]
struct Cli {
    /// Input answer file, directory, or - for stdin
    #[arg(required_unless_present_any = ["init", "schema"])]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: html, text, json or blocks
    #[arg(short, long)]
    format: Option<String>,

    /// Number of parallel jobs (defaults to number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Process directories recursively
    #[arg(short, long)]
    recursive: bool,

    /// Treat input as an answer service JSON payload (implied for .json files)
    #[arg(long)]
    payload: bool,

    /// Write complete HTML documents instead of fragments
    #[arg(long)]
    standalone: bool,

    /// Configuration file (defaults to _atlas-render.toml in the current directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a sample configuration file and exit
    #[arg(long)]
    init: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    schema: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Settings resolved from the command line and the config file
#[derive(Debug, Clone)]
struct Settings {
    format: OutputFormat,
    options: RenderOptions,
    payload: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let format = match &cli.format {
            Some(s) => s.parse::<OutputFormat>()?,
            None => config.output_format()?.unwrap_or_default(),
        };

        let mut options = config.render_options()?;
        if cli.standalone {
            options.html.standalone = true;
        }

        Ok(Self {
            format,
            options,
            payload: cli.payload,
        })
    }

    /// Whether the content of `path` is a service payload
    fn is_payload(&self, path: Option<&Path>) -> bool {
        self.payload
            || path
                .and_then(Path::extension)
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if cli.schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if cli.init {
        return init_config(cli.config.as_deref(), cli.quiet);
    }

    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config)?;
    debug!(format = %settings.format, "resolved settings");

    let Some(input) = cli.input.as_deref() else {
        anyhow::bail!("No input given");
    };

    if input == Path::new("-") {
        render_stdin(&settings)?;
    } else if input.is_file() {
        convert_file(input, cli.output.as_deref(), &settings, cli.quiet)?;
    } else if input.is_dir() {
        convert_directory(
            input,
            cli.output.as_deref(),
            cli.recursive,
            &settings,
            cli.quiet,
            cli.jobs,
        )?;
    } else {
        anyhow::bail!("Input path does not exist: {}", input.display());
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flags
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}

/// Load the explicit config file, or `_atlas-render.toml` from the current directory
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        debug!(path = %path.display(), "loading config");
        return Config::load(path);
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    match Config::load_from_dir(&cwd)? {
        Some(config) => {
            debug!(path = %cwd.join(CONFIG_FILE_NAME).display(), "loaded config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Write a sample configuration file
fn init_config(path: Option<&Path>, quiet: bool) -> Result<()> {
    let path = path.unwrap_or(Path::new(CONFIG_FILE_NAME));
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

    if !quiet {
        println!("{}", path.display());
    }
    Ok(())
}

/// Render stdin to stdout
fn render_stdin(settings: &Settings) -> Result<()> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;

    let rendered = render_content(content, settings.is_payload(None), None, settings)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("Failed to write stdout")?;
    Ok(())
}

/// Render a single answer file
fn convert_file(
    input: &Path,
    output: Option<&Path>,
    settings: &Settings,
    quiet: bool,
) -> Result<()> {
    let output_path = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension(settings.format.extension()),
    };

    info!(
        input = %input.display(),
        output = %output_path.display(),
        "rendering"
    );

    render_file(input, &output_path, settings)?;

    if !quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Render a directory of answer files
fn convert_directory(
    input: &Path,
    output: Option<&Path>,
    recursive: bool,
    settings: &Settings,
    quiet: bool,
    jobs: Option<usize>,
) -> Result<()> {
    let output_dir = output.unwrap_or(input);

    let files = collect_answer_files(input, recursive)?;

    if files.is_empty() {
        if !quiet {
            warn!("No answer files found in {}", input.display());
        }
        return Ok(());
    }

    info!(count = files.len(), "found answer files");

    let (planned, rejected) = plan_jobs(files, input, output_dir, settings.format);

    // Configure thread pool if jobs specified
    if let Some(n) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(rejected.len());

    let mut errors = rejected;
    errors.extend(
        planned
            .par_iter()
            .filter_map(|job| match render_file(&job.input, &job.output, settings) {
                Ok(()) => {
                    success.fetch_add(1, Ordering::Relaxed);
                    if !quiet {
                        println!("{}", job.output.display());
                    }
                    None
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    Some((job.input.clone(), e))
                }
            })
            .collect::<Vec<_>>(),
    );

    for (file, e) in &errors {
        eprintln!("Error rendering {}: {:#}", file.display(), e);
    }

    let success_count = success.load(Ordering::Relaxed);
    let failed_count = failed.load(Ordering::Relaxed);

    if !quiet {
        eprintln!("Rendered {} files, {} failed", success_count, failed_count);
    }

    if failed_count > 0 {
        anyhow::bail!("{} files failed to render", failed_count);
    }

    Ok(())
}

/// One input file of a directory run and the path it renders to
#[derive(Debug, Clone, PartialEq, Eq)]
struct Job {
    input: PathBuf,
    output: PathBuf,
}

/// Pair every input with its output path.
///
/// Files whose output would replace one of the inputs, or would also be
/// written by another input, are rejected with an error instead of a job.
fn plan_jobs(
    files: Vec<PathBuf>,
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> (Vec<Job>, Vec<(PathBuf, anyhow::Error)>) {
    let outputs: Vec<PathBuf> = files
        .iter()
        .map(|file| {
            let relative = file.strip_prefix(input_dir).unwrap_or(file);
            output_dir.join(relative).with_extension(format.extension())
        })
        .collect();

    let inputs: HashSet<PathBuf> = files.iter().map(|file| normalize_path(file)).collect();
    let targets: Vec<PathBuf> = outputs.iter().map(|output| normalize_path(output)).collect();
    let mut writers: HashMap<&Path, usize> = HashMap::new();
    for target in &targets {
        *writers.entry(target.as_path()).or_default() += 1;
    }

    let mut jobs = Vec::new();
    let mut rejected = Vec::new();
    for ((input, output), target) in files.into_iter().zip(outputs).zip(&targets) {
        if inputs.contains(target) {
            let err = anyhow::anyhow!("Refusing to overwrite input file: {}", output.display());
            rejected.push((input, err));
        } else if writers.get(target.as_path()).is_some_and(|&count| count > 1) {
            let err = anyhow::anyhow!(
                "Output file {} would be written by more than one input",
                output.display()
            );
            rejected.push((input, err));
        } else {
            jobs.push(Job { input, output });
        }
    }

    debug!(jobs = jobs.len(), rejected = rejected.len(), "planned outputs");
    (jobs, rejected)
}

/// Absolute form of a path whose file may not exist yet
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }

    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    fs::canonicalize(parent)
        .map(|parent| parent.join(name))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Read, render and write one file without printing
fn render_file(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    ensure_not_input(input, output)?;

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;

    let title = input.file_stem().and_then(|s| s.to_str());
    let rendered = render_content(content, settings.is_payload(Some(input)), title, settings)
        .with_context(|| format!("Failed to render: {}", input.display()))?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(output, rendered).with_context(|| format!("Failed to write: {}", output.display()))?;

    Ok(())
}

/// Render raw answer text, or the answer of a payload
///
/// `title` names a standalone HTML document.
fn render_content(
    content: String,
    is_payload: bool,
    title: Option<&str>,
    settings: &Settings,
) -> Result<String> {
    let answer = if is_payload {
        let payload = AnswerPayload::from_json(&content)?;
        debug!(
            citations = payload.citations.len(),
            "decoded answer payload"
        );
        payload.answer
    } else {
        content
    };

    if settings.options.html.standalone && title.is_some() {
        let mut options = settings.options.clone();
        options.html.title = title.map(str::to_string);
        return Ok(render_to_string(&answer, settings.format, &options)?);
    }

    Ok(render_to_string(&answer, settings.format, &settings.options)?)
}

fn ensure_not_input(input: &Path, output: &Path) -> Result<()> {
    let same_file = output == input
        || (output.exists() && fs::canonicalize(output).ok() == fs::canonicalize(input).ok());
    if same_file {
        anyhow::bail!("Refusing to overwrite input file: {}", input.display());
    }
    Ok(())
}

/// Collect answer files in a directory
fn collect_answer_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if is_answer_file(&path) {
                files.push(path);
            }
        } else if path.is_dir() && recursive {
            files.extend(collect_answer_files(&path, recursive)?);
        }
    }

    files.sort();
    Ok(files)
}

fn is_answer_file(path: &Path) -> bool {
    let Some(ext) = path.extension() else {
        return false;
    };
    if is_blocks_output(path) {
        return false;
    }
    INPUT_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Whether `path` was written by the `blocks` format
fn is_blocks_output(path: &Path) -> bool {
    let suffix = format!(".{}", OutputFormat::Blocks.extension());
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| {
            name.len()
                .checked_sub(suffix.len())
                .and_then(|at| name.get(at..))
        })
        .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix))
}
