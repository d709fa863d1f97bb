use clap::Parser;
use jhtml_core::CompileOptions;
use std::fmt::Display;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Source extensions picked up when an input is a directory.
const SOURCE_EXTENSIONS: &[&str] = &["jhtml", "json5"];

#[derive(Parser)]
#[command(name = "jhtml", about = "Compile jHTML (JSON5 tag trees) to HTML")]
struct Cli {
    /// Input jHTML file(s) or directory. Omit to read from stdin.
    #[arg()]
    input: Vec<PathBuf>,

    /// Output file (single input only) or directory (multiple inputs).
    /// Omit to write to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a TOML file with compile options.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prepend `<!DOCTYPE html>` to every output.
    #[arg(long)]
    doctype: bool,

    /// HTML-escape text and attribute values.
    #[arg(long)]
    escape: bool,

    /// File extension for output files in directory mode (default: "html").
    #[arg(long, default_value = "html")]
    ext: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = load_options(&cli);

    if cli.input.is_empty() {
        write_html(&Source::Stdin.compile(&options), cli.output.as_deref());
        return;
    }

    let files = collect_source_files(&cli.input);
    if files.is_empty() {
        fail("collecting inputs", "no .jhtml or .json5 files found");
    }

    if let [file] = files.as_slice() {
        write_html(&Source::File(file).compile(&options), cli.output.as_deref());
        return;
    }

    let Some(out_dir) = cli.output.as_deref() else {
        fail("writing output", "multiple input files require --output directory");
    };
    std::fs::create_dir_all(out_dir).unwrap_or_else(|e| fail("creating output directory", e));
    for file in &files {
        let html = Source::File(file).compile(&options);
        let out_path = out_dir.join(output_name(file, &cli.ext));
        write_html(&html, Some(&out_path));
        tracing::info!(from = %file.display(), to = %out_path.display(), "compiled");
        eprintln!("{} -> {}", file.display(), out_path.display());
    }
}

/// Print `Error {what}: {err}` and exit with status 1.
fn fail(what: &str, err: impl Display) -> ! {
    eprintln!("Error {what}: {err}");
    std::process::exit(1)
}

/// Options from `--config`, with command-line flags switched on over it.
fn load_options(cli: &Cli) -> CompileOptions {
    let mut options = match &cli.config {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .unwrap_or_else(|e| fail(&format!("reading config {}", path.display()), e));
            CompileOptions::from_toml(&toml_str).unwrap_or_else(|e| fail("parsing config", e))
        }
        None => CompileOptions::default(),
    };
    options.doctype |= cli.doctype;
    options.escape |= cli.escape;
    tracing::debug!(?options, "compile options");
    options
}

/// Where a jHTML document is read from.
enum Source<'a> {
    Stdin,
    File(&'a Path),
}

impl Source<'_> {
    fn label(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> io::Result<String> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            Source::File(path) => std::fs::read_to_string(path),
        }
    }

    /// Read and compile, exiting on any failure.
    fn compile(&self, options: &CompileOptions) -> String {
        let source = self
            .read()
            .unwrap_or_else(|e| fail(&format!("reading {}", self.label()), e));
        jhtml_core::compile_with_options(&source, options)
            .unwrap_or_else(|e| fail(&format!("compiling {}", self.label()), e))
    }
}

/// Write HTML to `target` (creating missing parent directories), or to
/// stdout when there is no target.
fn write_html(html: &str, target: Option<&Path>) {
    let written = match target {
        Some(path) => create_parent(path).and_then(|()| std::fs::write(path, html)),
        None => io::stdout().write_all(html.as_bytes()),
    };
    if let Err(e) = written {
        let dest = target.map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
        fail(&format!("writing {dest}"), e);
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn output_name(file: &Path, ext: &str) -> String {
    let stem = file.file_stem().unwrap_or(file.as_os_str()).to_string_lossy();
    format!("{stem}.{ext}")
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn collect_source_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if is_source_file(&path) {
                        files.push(path);
                    }
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files.sort();
    files
}
