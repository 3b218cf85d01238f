//! `jsontrace`: parse a JSON document and print its structural spans and
//! value tree.
use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use jsontrace::{DEFAULT_MAX_DEPTH, ParserError, ParserOptions, SpanDump, TreeDump};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Characters of input shown on each side of a syntax error.
const CONTEXT_RADIUS: usize = 40;

#[derive(Parser, Debug)]
#[command(
    name = "jsontrace",
    version,
    about = "Dump the structural spans and value tree of a JSON document",
    long_about = None
)]
struct Cli {
    #[arg(help = "Input file; reads stdin when omitted or `-`")]
    input: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = 80,
        help = "Longest source excerpt printed per span before it is cut with ` ...`"
    )]
    max_len: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, help = "Nesting limit for arrays and objects")]
    max_depth: usize,

    #[arg(
        long,
        help = "Only skip ASCII whitespace (C isspace) instead of Unicode separators"
    )]
    ascii_whitespace: bool,

    #[arg(long, help = "Require `:` between an object key and its value")]
    strict_colon: bool,

    #[arg(long, value_enum, default_value = "both", help = "Sections to print: spans|tree|both")]
    output: Output,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Spans,
    Tree,
    Both,
}

impl Cli {
    fn options(&self) -> ParserOptions {
        ParserOptions {
            max_depth: self.max_depth,
            allow_unicode_whitespace: !self.ascii_whitespace,
            strict_key_separator: self.strict_colon,
            ..Default::default()
        }
    }

    fn source_name(&self) -> String {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => path.display().to_string(),
            _ => "<stdin>".to_owned(),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {name}: {source}")]
    Read { name: String, source: io::Error },

    #[error("{name}: {source}\n{context}")]
    Parse {
        name: String,
        source: ParserError,
        context: String,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let name = cli.source_name();
    let text = read_input(cli.input.as_deref()).map_err(|source| CliError::Read {
        name: name.clone(),
        source,
    })?;
    render(cli, &name, &text, out)
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().lock().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn render(cli: &Cli, name: &str, text: &str, out: &mut impl Write) -> Result<(), CliError> {
    let doc = jsontrace::Parser::new(text, cli.options())
        .parse()
        .map_err(|source| CliError::Parse {
            name: name.to_owned(),
            context: source.context(text, CONTEXT_RADIUS).to_string(),
            source,
        })?;

    let rest = &text[doc.end()..];
    if !rest.trim_start().is_empty() {
        tracing::warn!(
            offset = doc.end(),
            ignored = rest.len(),
            "input continues after the top-level value"
        );
    }

    let mut out = BufWriter::new(out);
    if cli.output != Output::Tree {
        writeln!(out, "spans:")?;
        write!(out, "{}", SpanDump::new(text, doc.trace(), cli.max_len))?;
    }
    if cli.output != Output::Spans {
        writeln!(out, "tree:")?;
        write!(out, "{}", TreeDump(doc.value()))?;
    }
    out.flush()?;
    Ok(())
}
