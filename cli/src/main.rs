mod config;
mod error;
mod loader;
mod logger;

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::{debug, error, info};

use renderer::{TemplateSet, Threshold, filter_document, has_placeholder};

use crate::error::CliError;
use crate::loader::{DocumentStore, FsDocuments, FsLoader};

#[derive(Parser)]
#[command(
    name = "docblox2md",
    version,
    about = "Regenerate API documentation sections of Markdown files from doc-comments"
)]
struct Cli {
    /// Markdown files to update in place
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Log each processed file
    #[arg(short, long)]
    verbose: bool,

    /// Document public members only
    #[arg(short = 'p', long)]
    skip_protected: bool,

    /// Document private members as well
    #[arg(short = 'i', long)]
    include_private: bool,

    /// Template configuration file (skips discovery)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored diagnostics and logs
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn threshold(&self) -> Threshold {
        if self.include_private {
            Threshold::Private
        } else if self.skip_protected {
            Threshold::Public
        } else {
            Threshold::default()
        }
    }

    fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    logger::init_logger(cli.verbose, cli.no_color);

    let writer = StandardStream::stderr(cli.color_choice());
    let term_config = term::Config::default();

    let templates = match config::resolve_templates(cli.config.as_deref()) {
        Ok(templates) => templates,
        Err(err) => {
            report_config_error(&writer, &term_config, &err);
            process::exit(1);
        }
    };

    let mut session = Session {
        templates,
        threshold: cli.threshold(),
        loader: FsLoader::new(),
        documents: FsDocuments,
        writer,
        term_config,
        fatal_errors: false,
    };

    for path in &cli.files {
        session.run(path);
    }

    let code = session.exit_code();
    if code != 0 {
        process::exit(code);
    }
}

fn report_config_error(writer: &StandardStream, term_config: &term::Config, err: &CliError) {
    match err {
        CliError::ConfigParse { path, text, error } => {
            let mut files = SimpleFiles::new();
            let file_id = files.add(path.display().to_string(), text.clone());
            let diagnostic = config::parse_error_diagnostic(error, file_id);
            let _ = term::emit_to_write_style(&mut writer.lock(), term_config, &files, &diagnostic);
        }
        other => error!("{}", other),
    }
}

// ---------------------------------------------------------------------------
// Per-document processing
// ---------------------------------------------------------------------------

struct Session<D: DocumentStore> {
    templates: TemplateSet,
    threshold: Threshold,
    loader: FsLoader,
    documents: D,
    writer: StandardStream,
    term_config: term::Config,
    fatal_errors: bool,
}

impl<D: DocumentStore> Session<D> {
    fn run(&mut self, path: &Path) {
        if let Err(err) = self.process(path) {
            error!("{}", err);
            if err.is_fatal() {
                self.fatal_errors = true;
            }
        }
    }

    /// 2 once any document failed to be written, 0 otherwise.
    fn exit_code(&self) -> i32 {
        if self.fatal_errors { 2 } else { 0 }
    }

    fn process(&mut self, path: &Path) -> Result<(), CliError> {
        let doc = self.documents.read(path).map_err(|source| CliError::ReadDocument {
            path: path.to_path_buf(),
            source,
        })?;

        if !has_placeholder(&doc) {
            debug!("{}: no doc-comment placeholders", path.display());
            return Ok(());
        }

        let substitution =
            filter_document(&doc, self.threshold, &self.templates, &mut self.loader);

        for warning in &substitution.warnings {
            let diagnostic = warning.to_diagnostic();
            let _ = term::emit_to_write_style(
                &mut self.writer.lock(),
                &self.term_config,
                self.loader.files(),
                &diagnostic,
            );
        }

        if substitution.text == doc {
            debug!("{}: up to date", path.display());
            return Ok(());
        }

        self.documents
            .write(path, &substitution.text)
            .map_err(|source| CliError::WriteDocument {
                path: path.to_path_buf(),
                source,
            })?;
        info!("updated {}", path.display());
        Ok(())
    }
}
