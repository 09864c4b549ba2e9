//! Entry points: collect declarations from text, files or syntax nodes.

use std::path::Path;
use std::sync::Arc;

use sparrow_syntax::{parse, Parse, ParseError, SyntaxNode};
use tracing::{debug, warn};

use crate::collector::{collect, collect_entering_at, DeclarationCollection};
use crate::context::{ExplorerConfig, ExplorerContext};
use crate::decls::Declaration;
use crate::error::ExplorerError;
use crate::location::SourceLocation;

/// Logs the errors a parse recovered from; collection proceeds regardless.
fn log_parse_errors(parse: &Parse) {
    if parse.ok() {
        return;
    }
    warn!(
        "collecting despite parse errors count={} first={}",
        parse.errors().len(),
        parse
            .errors()
            .first()
            .map(ToString::to_string)
            .unwrap_or_default()
    );
}

/// Parses `text` and collects its declarations.
///
/// Parse errors never fail the collection; the view mode only decides
/// whether error-recovery nodes are visited. Use [`SyntaxExplorer`] to keep
/// the errors.
#[must_use]
pub fn collect_declarations_from_source(
    text: &str,
    config: &ExplorerConfig,
) -> DeclarationCollection {
    let parse = parse(text);
    log_parse_errors(&parse);
    let ctx = ExplorerContext::shared(*config, text);
    collect(&parse.syntax(), &ctx)
}

/// Reads `path` and collects its declarations.
pub fn collect_declarations_from_path(
    path: impl AsRef<Path>,
    config: &ExplorerConfig,
) -> Result<DeclarationCollection, ExplorerError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ExplorerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("collecting file path={} bytes={}", path.display(), text.len());
    Ok(collect_declarations_from_source(&text, config))
}

/// Collects the declarations below `node`; `node` itself is not included.
#[must_use]
pub fn collect_declarations_from_node(
    node: &SyntaxNode,
    ctx: &Arc<ExplorerContext>,
) -> DeclarationCollection {
    collect_entering_at(node, ctx)
}

/// Line and column span of `decl`; fields are `None` when unresolvable.
#[must_use]
pub fn location_of<D: Declaration + ?Sized>(decl: &D) -> SourceLocation {
    decl.location()
}

/// Holds one evolving source buffer, its last collection and the parse
/// errors that collection recovered from.
///
/// ```
/// use sparrow_hir::{ExplorerConfig, SyntaxExplorer};
///
/// let mut explorer = SyntaxExplorer::new("func a() {}", ExplorerConfig::default());
/// assert_eq!(explorer.collect().functions.len(), 1);
///
/// explorer.update_source("func a() {}\nfunc b() {}");
/// assert!(explorer.is_stale());
/// assert_eq!(explorer.declarations().functions.len(), 1);
/// assert_eq!(explorer.collect().functions.len(), 2);
/// assert!(explorer.errors().is_empty());
/// ```
#[derive(Debug)]
pub struct SyntaxExplorer {
    ctx: Arc<ExplorerContext>,
    declarations: DeclarationCollection,
    errors: Vec<ParseError>,
}

impl SyntaxExplorer {
    /// Creates an explorer over `source`. Nothing is collected until
    /// [`collect`](Self::collect) runs.
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>, config: ExplorerConfig) -> Self {
        let ctx = ExplorerContext::shared(config, "");
        ctx.set_source(source);
        Self {
            ctx,
            declarations: DeclarationCollection::default(),
            errors: Vec::new(),
        }
    }

    /// The shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<ExplorerContext> {
        &self.ctx
    }

    /// Replaces the source; the current collection becomes stale.
    pub fn update_source(&self, source: impl Into<Arc<str>>) {
        self.ctx.set_source(source);
    }

    /// Returns `true` if the source changed since the last collection.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.ctx.is_stale()
    }

    /// Re-parses the current source and replaces the collection and its
    /// parse errors.
    pub fn collect(&mut self) -> &DeclarationCollection {
        let source = self.ctx.source();
        let parse = parse(&source);
        log_parse_errors(&parse);

        self.errors = parse.errors().to_vec();
        self.declarations = collect(&parse.syntax(), &self.ctx);
        self.ctx.mark_fresh();
        &self.declarations
    }

    /// The last collection, possibly stale.
    #[must_use]
    pub fn declarations(&self) -> &DeclarationCollection {
        &self.declarations
    }

    /// Parse errors the last collection recovered from.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}
