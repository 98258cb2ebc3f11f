//! End-to-end compilation: SDL text in, DDL script out.
//!
//! The pipeline is strictly sequential. Any failure aborts the whole build and
//! nothing is written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::{
    BuildError, DirectiveRegistry, Extractor, MysqlCompiler, RelationalModel, gather_indices,
    normalize,
};
use crate::sdl;

/// Inputs of a single build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Annotation names the extractor recognizes
    pub directives: DirectiveRegistry,
    /// Database every table is qualified with
    pub database_name: String,
    /// Prepended to every table name
    pub table_prefix: String,
}

impl BuildOptions {
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            directives: DirectiveRegistry::default(),
            database_name: database_name.into(),
            table_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, table_prefix: impl Into<String>) -> Self {
        self.table_prefix = table_prefix.into();
        self
    }

    pub fn with_directives(mut self, directives: DirectiveRegistry) -> Self {
        self.directives = directives;
        self
    }
}

/// Where a finished script goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Kept in memory only; the caller decides how to present it.
    Memory,
    /// Written to this path in a single write.
    File(PathBuf),
}

impl From<Option<PathBuf>> for OutputSink {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Memory, OutputSink::File)
    }
}

/// A finished build: the validated model and the script compiled from it.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub model: RelationalModel,
    pub script: String,
}

/// Parses, validates, and extracts the relational model from `source`.
///
/// The returned model is normalized and has its indices classified, so it is
/// ready to be compiled.
pub fn build_model(source: &str, registry: &DirectiveRegistry) -> Result<RelationalModel, BuildError> {
    let document = sdl::parse(source)?;

    let implicit: Vec<&str> = registry.names().collect();
    sdl::validate(&document, &implicit)?;
    tracing::debug!(definitions = document.definitions.len(), "schema parsed");

    let mut extractor = Extractor::new(registry);
    sdl::walk(&document, &mut extractor)?;
    let mut model = extractor.into_model();
    tracing::debug!(
        tables = model.len(),
        columns = model.column_count(),
        "annotations extracted"
    );

    normalize(&mut model)?;
    gather_indices(&mut model)?;
    tracing::debug!(tables = model.len(), "model validated");

    Ok(model)
}

/// Runs the full pipeline and returns the DDL script.
pub fn build(source: &str, options: &BuildOptions) -> Result<String, BuildError> {
    let model = build_model(source, &options.directives)?;
    let compiler = MysqlCompiler::new(&options.database_name, &options.table_prefix);
    Ok(compiler.compile_all(&model))
}

/// Runs the full pipeline and delivers the script to `sink`.
///
/// Returns the model along with the script so callers can report on both.
pub fn build_to_sink(
    source: &str,
    options: &BuildOptions,
    sink: &OutputSink,
) -> Result<BuildOutput, BuildError> {
    let model = build_model(source, &options.directives)?;
    let script = MysqlCompiler::new(&options.database_name, &options.table_prefix)
        .compile_all(&model);

    if let OutputSink::File(path) = sink {
        write_output(path, &script)?;
    }
    Ok(BuildOutput { model, script })
}

/// Writes `script` to `path` in a single write, creating parent directories.
pub fn write_output(path: &Path, script: &str) -> Result<(), BuildError> {
    let write_failed = |e: std::io::Error| BuildError::WriteFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, script).map_err(write_failed)?;

    tracing::info!(path = %path.display(), bytes = script.len(), "schema written");
    Ok(())
}
