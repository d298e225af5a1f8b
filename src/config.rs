//! Reader and writer settings.

/// Document type name written in the `<!DOCTYPE ...>` declaration and used as
/// the root element name.
pub const DEFAULT_DOCTYPE: &str = "BrickStoreXML";
pub const DEFAULT_INDENT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Build items on the rayon thread pool. Item order is preserved either way.
    pub parallel: bool,
}

impl ReaderOptions {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// Spaces per nesting level; 0 writes the document without line breaks
    pub indent: usize,
    pub doctype: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            doctype: DEFAULT_DOCTYPE.to_string(),
        }
    }
}

impl WriterOptions {
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the doctype and root element name. The writer rejects names that
    /// are not valid XML element names.
    pub fn doctype(mut self, doctype: impl Into<String>) -> Self {
        self.doctype = doctype.into();
        self
    }
}
