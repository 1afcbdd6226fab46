//! Error adapter for converting MeshviewError to miette diagnostics.

use std::fmt;

use miette::{Diagnostic, LabeledSpan};

use meshview::MeshviewError;

/// Wraps a [`MeshviewError`] so it can be rendered by miette.
pub struct ErrorAdapter<'a>(pub &'a MeshviewError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            MeshviewError::Io(_) => "meshview::io",
            MeshviewError::Config(_) => "meshview::config",
            MeshviewError::Graph(_) => "meshview::graph",
            MeshviewError::UnknownNode(_) => "meshview::unknown_node",
            MeshviewError::Export(_) => "meshview::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            MeshviewError::UnknownNode(_) => {
                "node ids look like Router0, CPU1, L1_2, L2Cache3, L3Cache0 or Memory"
            }
            MeshviewError::Config(_) => "check the [window], [view] and [style] tables",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
