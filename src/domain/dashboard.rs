// Dashboard domain model
use super::layout::LayoutNode;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: String,
    pub value: Option<f64>,
}

impl SummaryCard {
    pub fn new(title: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }

    /// Value rounded to a whole number.
    pub fn display_value(&self) -> String {
        match self.value {
            Some(value) => format!("{:.0}", value.round()),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    pub title: String,
    pub root: LayoutNode,
}

impl Dashboard {
    pub fn new(title: String, root: LayoutNode) -> Self {
        Self { title, root }
    }
}
