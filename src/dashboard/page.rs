//! Dashboard page markup

use super::controller::DashboardView;
use crate::render::html_escape;

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; background: #f5f5f5; color: #222; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 320px; padding: 16px 20px; background: #fff; border-right: 1px solid #ddd; box-sizing: border-box; }
.sidebar h2 { font-size: 20px; margin: 4px 0 16px; }
.sidebar label { display: block; font-size: 13px; color: #555; margin: 12px 0 4px; }
.sidebar input[type=number] { width: 80px; }
.sidebar table { border-collapse: collapse; width: 100%; margin-top: 16px; font-size: 13px; }
.sidebar th, .sidebar td { border-bottom: 1px solid #eee; padding: 4px 6px; text-align: center; }
.stats { font-size: 12px; color: #777; margin-top: 12px; }
.notice { background: #fff3e0; border: 1px solid #ffb74d; padding: 8px; font-size: 13px; margin-top: 12px; }
.graph { flex: 1; }
.placeholder { padding: 40px; text-align: center; color: #888; }
"#;

/// Render the full dashboard page for `view`.
///
/// `notice` is shown above the arc table, e.g. when a filter change was
/// rejected.
pub fn render_page(view: &DashboardView, frame_height: &str, notice: Option<&str>) -> String {
    let filter = &view.filter;
    let bounds = &view.bounds;

    let checked = if filter.include_filler { " checked" } else { "" };
    let disabled = if view.filler_toggle_enabled { "" } else { " disabled" };

    let mut rows = String::new();
    for arc in &view.arcs {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            html_escape(&arc.arc_name),
            html_escape(&arc.episodes.to_string())
        ));
    }

    let notice = notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, html_escape(n)))
        .unwrap_or_default();

    let stats = &view.stats;
    let content = format!(
        r#"<div class="layout">
<div class="sidebar">
<h2>Relationship Network</h2>
<form id="filters" method="get" action="/">
<label>Episode Range ({bmin} - {bmax})</label>
<input type="number" name="min" min="{bmin}" max="{bmax}" value="{min}" onchange="this.form.submit()">
<input type="number" name="max" min="{bmin}" max="{bmax}" value="{max}" onchange="this.form.submit()">
<input type="hidden" name="filler" id="filler-value" value="{include}">
<label><input type="checkbox" id="filler"{checked}{disabled} onchange="document.getElementById('filler-value').value = this.checked; this.form.submit()"> Include Filler</label>
</form>
{notice}
<table>
<thead><tr><th>Arc Name</th><th>Episode Range/ Episodes</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<div class="stats">{episodes} episodes, {edges} relationships, {nodes} characters</div>
</div>
<div class="graph">{graph}</div>
</div>"#,
        bmin = bounds.min,
        bmax = bounds.max,
        min = filter.range.min,
        max = filter.range.max,
        include = filter.include_filler,
        checked = checked,
        disabled = disabled,
        notice = notice,
        rows = rows,
        episodes = stats.episodes_selected,
        edges = stats.edges,
        nodes = stats.nodes,
        graph = view.pane.to_fragment(frame_height),
    );

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Relationship Network</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        STYLE, content
    )
}
