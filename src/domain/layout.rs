// Page layout tree
use super::chart::ChartSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Heading,
    CardTitle,
    CardText,
}

/// A node of the page: containers own their children in order, leaves hold
/// text or a chart. The tree is built once and never shared or mutated.
#[derive(Debug)]
pub enum LayoutNode {
    Page(Vec<LayoutNode>),
    Row(Vec<LayoutNode>),
    Column(Vec<LayoutNode>),
    Card(Vec<LayoutNode>),
    Text { role: TextRole, text: String },
    Chart { id: String, spec: ChartSpec },
}

impl LayoutNode {
    pub fn text(role: TextRole, text: impl Into<String>) -> Self {
        LayoutNode::Text {
            role,
            text: text.into(),
        }
    }

    pub fn chart(id: impl Into<String>, spec: ChartSpec) -> Self {
        LayoutNode::Chart { id: id.into(), spec }
    }

    pub fn children(&self) -> &[LayoutNode] {
        match self {
            LayoutNode::Page(children)
            | LayoutNode::Row(children)
            | LayoutNode::Column(children)
            | LayoutNode::Card(children) => children,
            LayoutNode::Text { .. } | LayoutNode::Chart { .. } => &[],
        }
    }

    /// Chart leaves in document order.
    pub fn charts(&self) -> Vec<(&str, &ChartSpec)> {
        let mut found = Vec::new();
        self.collect_charts(&mut found);
        found
    }

    fn collect_charts<'a>(&'a self, found: &mut Vec<(&'a str, &'a ChartSpec)>) {
        if let LayoutNode::Chart { id, spec } = self {
            found.push((id.as_str(), spec));
        }
        for child in self.children() {
            child.collect_charts(found);
        }
    }

    /// Text leaves with the given role, in document order.
    pub fn texts(&self, role: TextRole) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_texts(role, &mut found);
        found
    }

    fn collect_texts<'a>(&'a self, role: TextRole, found: &mut Vec<&'a str>) {
        if let LayoutNode::Text { role: r, text } = self {
            if *r == role {
                found.push(text.as_str());
            }
        }
        for child in self.children() {
            child.collect_texts(role, found);
        }
    }
}
