//! Processing of one input file.
//!
//! syn values are not `Send`, so everything a worker hands back is plain
//! text: the generated source and the rendered diagnostics.

use std::fmt;
use std::path::{Path, PathBuf};

use caseview_codegen::{
    ConfigFile, Diagnostic, DiagnosticSink, GeneratorConfig, Severity, SourceSpan, generate,
};

use crate::error::CliError;
use crate::scan;

/// One generated dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub owner: String,
    pub view: String,
    pub source: String,
}

/// What processing a file produced.
#[derive(Debug, Default)]
pub struct FileReport {
    pub path: PathBuf,
    pub generated: Vec<Generated>,
    /// `path:line:column: severity: message`, in the order raised.
    pub diagnostics: Vec<String>,
    pub errors: usize,
    pub warnings: usize,
    /// Names of the declarations that were selected.
    pub selected: Vec<String>,
}

impl FileReport {
    /// Generated code of the whole file, each dispatcher under a header line.
    pub fn render(&self) -> impl Iterator<Item = String> + '_ {
        self.generated.iter().map(move |g| {
            format!(
                "// {} for {} ({})\n{}",
                g.view,
                g.owner,
                self.path.display(),
                g.source
            )
        })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} generated, {} error(s), {} warning(s)",
            self.path.display(),
            self.generated.len(),
            self.errors,
            self.warnings
        )
    }
}

/// Renders diagnostics against a file path.
struct FileSink<'a> {
    report: &'a mut FileReport,
}

impl DiagnosticSink for FileSink<'_> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.report.errors += 1,
            Severity::Warning => self.report.warnings += 1,
        }
        self.report
            .diagnostics
            .push(format!("{}:{diagnostic}", self.report.path.display()));
    }
}

/// Reads and processes one file.
pub fn process_file(path: &Path, config: &ConfigFile, types: &[String]) -> Result<FileReport, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    process_source(path, &text, config, types)
}

/// Generates a dispatcher for every selected declaration in `text`.
pub fn process_source(
    path: &Path,
    text: &str,
    config: &ConfigFile,
    types: &[String],
) -> Result<FileReport, CliError> {
    let file = syn::parse_file(text).map_err(|e| CliError::parse(path, &e))?;
    let base = GeneratorConfig::try_from(config.clone())?;

    let mut report = FileReport {
        path: path.to_path_buf(),
        ..FileReport::default()
    };

    for selected in scan::select(&file.items, types) {
        let name = scan::item_name(selected.item);
        if let Some(name) = &name {
            report.selected.push(name.clone());
        }

        let config = match selected.args {
            None => base.clone(),
            Some(Ok(args)) => args.apply(base.clone()),
            Some(Err(e)) => {
                let declaration = name.unwrap_or_else(|| "<item>".to_owned());
                let diagnostic = Diagnostic::error(e.to_string(), SourceSpan::new(declaration, e.span()));
                FileSink { report: &mut report }.report(&diagnostic);
                continue;
            }
        };

        let artifact = generate(selected.item, &config).report(&mut FileSink { report: &mut report });
        if let Some(artifact) = artifact {
            report.generated.push(Generated {
                owner: artifact.target_extension_owner.to_string(),
                view: artifact.generated_type_name.to_string(),
                source: artifact.to_source(),
            });
        }
    }

    tracing::info!("{report}");
    Ok(report)
}
