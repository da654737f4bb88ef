// Chart domain model: a built plotly figure tagged with its kind and title
use plotly::Plot;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Donut,
    Scatter,
}

/// A finished figure. Built once at startup and afterwards only serialized.
pub struct ChartSpec {
    kind: ChartKind,
    title: String,
    plot: Plot,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, plot: Plot) -> Self {
        Self {
            kind,
            title: title.into(),
            plot,
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Plotly figure JSON with `data` and `layout`, as plotly.js takes it.
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }
}

impl fmt::Debug for ChartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSpec")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
