//! The generation pipeline.
//!
//! One run is a straight line: load metadata, attach comments and source
//! symbols, build the model, render, reconcile. Everything up to
//! reconciliation is pure computation over in-memory data; only the final
//! step touches the output directory, and in dry-run or verify mode not
//! even that.

use std::path::{Path, PathBuf};

use xmdoc_comments::{CommentError, CommentSource, NullCommentSource, SourceSymbols, XmlCommentSource};
use xmdoc_config::{ConfigError, GenerateSettings};
use xmdoc_meta::{JsonMetadataProvider, MetadataError, MetadataProvider};
use xmdoc_model::{ModelBuildError, ModelBuilder};
use xmdoc_reconcile::{ReconcileError, ReconcileMode, reconcile};
use xmdoc_render::{RenderError, RenderOptions, render};
use xmdoc_storage::{DocStorage, FsStorage};

use crate::result::GenerationResult;

/// Generation failure.
///
/// Every variant means nothing was half-written: metadata, comment, model,
/// and render errors occur before any storage access, and reconciliation
/// writes only after classification succeeds.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Loading the assembly metadata artifact failed.
    #[error("failed to load assembly metadata: {0}")]
    Metadata(#[from] MetadataError),
    /// Loading the XML documentation or source symbol file failed.
    #[error("failed to load documentation comments: {0}")]
    Comments(#[from] CommentError),
    /// Building the documentation model failed.
    #[error("failed to build documentation model: {0}")]
    Model(#[from] ModelBuildError),
    /// Rendering failed.
    #[error("failed to render documentation: {0}")]
    Render(#[from] RenderError),
    /// Reconciling the output directory failed.
    #[error("failed to reconcile output directory: {0}")]
    Reconcile(#[from] ReconcileError),
    /// Loading configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Verify mode found differences between output and rendered pages.
    #[error("verification failed: {} file(s) differ from rendered documentation", result.difference_count())]
    VerificationFailed {
        /// The classification that failed verification.
        result: GenerationResult,
    },
}

/// Generate documentation for a metadata artifact into an output directory.
///
/// The XML documentation file defaults to the artifact's sibling with an
/// `.xml` extension; its absence is recorded as a message, not an error.
///
/// # Errors
///
/// Returns [`GenerateError`] when any pipeline stage fails, or
/// [`GenerateError::VerificationFailed`] when verify mode finds differences.
pub fn generate(
    artifact: &Path,
    output_dir: &Path,
    settings: &GenerateSettings,
) -> Result<GenerationResult, GenerateError> {
    let mut messages = Vec::new();

    let comments: Box<dyn CommentSource> = match comment_file(artifact, settings) {
        Some(path) => Box::new(XmlCommentSource::from_file(&path)?),
        None => {
            let message = format!(
                "No XML documentation file found for {}; pages will have no narrative text",
                artifact.display()
            );
            tracing::warn!("{message}");
            messages.push(message);
            Box::new(NullCommentSource)
        }
    };

    let symbols = settings
        .source_symbols
        .as_deref()
        .map(SourceSymbols::from_file)
        .transpose()?;

    let provider = JsonMetadataProvider::new();
    let storage = FsStorage::new(output_dir.to_path_buf());
    run(
        &provider,
        comments.as_ref(),
        symbols.as_ref(),
        &storage,
        artifact,
        settings,
        messages,
    )
}

/// Generate with injected capabilities.
///
/// The filesystem-free variant of [`generate`]: the caller supplies the
/// metadata provider, comment source, symbol map, and output storage.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_with(
    provider: &dyn MetadataProvider,
    comments: &dyn CommentSource,
    symbols: Option<&SourceSymbols>,
    storage: &dyn DocStorage,
    artifact: &Path,
    settings: &GenerateSettings,
) -> Result<GenerationResult, GenerateError> {
    run(provider, comments, symbols, storage, artifact, settings, Vec::new())
}

/// The XML documentation file for a run: an explicit path wins; otherwise
/// the artifact's `.xml` sibling, when it exists.
fn comment_file(artifact: &Path, settings: &GenerateSettings) -> Option<PathBuf> {
    if let Some(path) = &settings.xml_path {
        return Some(path.clone());
    }
    let sibling = artifact.with_extension("xml");
    sibling.exists().then_some(sibling)
}

fn run(
    provider: &dyn MetadataProvider,
    comments: &dyn CommentSource,
    symbols: Option<&SourceSymbols>,
    storage: &dyn DocStorage,
    artifact: &Path,
    settings: &GenerateSettings,
    mut messages: Vec<String>,
) -> Result<GenerationResult, GenerateError> {
    let meta = provider.load(artifact)?;

    let mut builder = ModelBuilder::new(comments)
        .with_external_assemblies(settings.external_assemblies.clone());
    if let Some(symbols) = symbols {
        builder = builder.with_symbols(symbols);
    }
    let model = builder.build(&meta)?;
    messages.extend(model.messages.iter().cloned());

    let options = RenderOptions {
        newline: settings.newline,
        emit_root_index: settings.emit_root_index,
        namespace_index_threshold: settings.namespace_index_threshold,
    };
    let rendered = render(&model.assembly, &model.links, &options)?;

    let mode = if settings.dry_run {
        ReconcileMode::DryRun
    } else if settings.verify {
        ReconcileMode::Verify
    } else {
        ReconcileMode::Normal
    };
    let report = reconcile(&rendered, storage, mode, settings.clean)?;

    let result = GenerationResult::from_report(report, messages);
    if settings.verify && !result.is_clean() {
        return Err(GenerateError::VerificationFailed { result });
    }

    tracing::info!(
        assembly = %model.assembly.name,
        added = result.added.len(),
        changed = result.changed.len(),
        removed = result.removed.len(),
        "Generation complete"
    );
    Ok(result)
}
