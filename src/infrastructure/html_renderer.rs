// HTML rendering of the layout tree
use crate::domain::dashboard::Dashboard;
use crate::domain::layout::{LayoutNode, TextRole};
use std::fmt::Write;

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render the whole page once. Chart figures are embedded as JSON and drawn
/// client-side by plotly.js.
pub fn render_page(dashboard: &Dashboard) -> anyhow::Result<String> {
    let mut body = String::new();
    render_node(&dashboard.root, &mut body)?;

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"{css}\">\n\
         <script src=\"{js}\"></script>\n\
         </head>\n<body>\n{body}</body>\n</html>\n",
        title = html_escape(&dashboard.title),
        css = BOOTSTRAP_CSS,
        js = PLOTLY_JS,
        body = body,
    ))
}

fn render_children(children: &[LayoutNode], out: &mut String) -> anyhow::Result<()> {
    for child in children {
        render_node(child, out)?;
    }
    Ok(())
}

fn render_node(node: &LayoutNode, out: &mut String) -> anyhow::Result<()> {
    match node {
        LayoutNode::Page(children) => {
            out.push_str("<div class=\"container-fluid\">\n");
            render_children(children, out)?;
            out.push_str("</div>\n");
        }
        LayoutNode::Row(children) => {
            out.push_str("<div class=\"row\">\n");
            render_children(children, out)?;
            out.push_str("</div>\n");
        }
        LayoutNode::Column(children) => {
            out.push_str("<div class=\"col\">\n");
            render_children(children, out)?;
            out.push_str("</div>\n");
        }
        LayoutNode::Card(children) => {
            out.push_str("<div class=\"card col text-white bg-dark\">\n<div class=\"card-body\">\n");
            render_children(children, out)?;
            out.push_str("</div>\n</div>\n");
        }
        LayoutNode::Text { role, text } => {
            let (tag, class) = match role {
                TextRole::Heading => ("h2", None),
                TextRole::CardTitle => ("h6", Some("card-title")),
                TextRole::CardText => ("h6", Some("card-text")),
            };
            let class = class.map(|c| format!(" class=\"{}\"", c)).unwrap_or_default();
            writeln!(
                out,
                "<{tag}{class} style=\"text-align: center\">{}</{tag}>",
                html_escape(text)
            )?;
        }
        LayoutNode::Chart { id, spec } => {
            let figure = script_safe(&spec.to_json());
            let id = html_escape(id);
            writeln!(out, "<div id=\"{id}\" class=\"dash-graph\"></div>")?;
            writeln!(
                out,
                "<script>(function () {{ var fig = {figure}; \
                 Plotly.newPlot(\"{id}\", fig.data, fig.layout, {{responsive: true}}); }})();</script>"
            )?;
        }
    }
    Ok(())
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep JSON from closing the surrounding script element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartKind, ChartSpec};
    use plotly::common::Title;
    use plotly::{Layout, Plot};

    fn dashboard() -> Dashboard {
        let mut plot = Plot::new();
        plot.set_layout(Layout::new().title(Title::from("</script><b>")));
        let chart = ChartSpec::new(ChartKind::Pie, "</script><b>", plot);
        let root = LayoutNode::Page(vec![
            LayoutNode::Row(vec![LayoutNode::Column(vec![LayoutNode::text(
                TextRole::Heading,
                "Ikan & <Udang>",
            )])]),
            LayoutNode::Row(vec![LayoutNode::Card(vec![
                LayoutNode::text(TextRole::CardTitle, "Produksi"),
                LayoutNode::text(TextRole::CardText, "45"),
            ])]),
            LayoutNode::Row(vec![LayoutNode::Column(vec![LayoutNode::chart("species-share", chart)])]),
        ]);
        Dashboard::new("Dashboard".to_string(), root)
    }

    #[test]
    fn test_renders_nested_containers() {
        let html = render_page(&dashboard()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Dashboard</title>"));
        assert!(html.contains("<div class=\"container-fluid\">"));
        assert_eq!(html.matches("<div class=\"row\">").count(), 3);
        assert!(html.contains("<h2 style=\"text-align: center\">Ikan &amp; &lt;Udang&gt;</h2>"));
        assert!(html.contains("<h6 class=\"card-text\" style=\"text-align: center\">45</h6>"));
        assert!(html.contains("<div id=\"species-share\" class=\"dash-graph\"></div>"));
        assert!(html.contains(PLOTLY_JS));
    }

    #[test]
    fn test_chart_json_cannot_close_script() {
        let html = render_page(&dashboard()).unwrap();
        assert!(html.contains("<\\/script><b>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render_page(&dashboard()).unwrap(), render_page(&dashboard()).unwrap());
    }
}
