// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render the report document to HTML, either by filling a template or by synthesizing a standalone page
// role: rendering/html
// inputs: &ReportDocument, template path (already resolved), report language
// outputs: Rendered { html, mode }
// side_effects: Reads the template file when present
// invariants:
// - Missing template is not an error; standalone mode is used and a warning logged
// - Unknown placeholders and chart literals that cannot be attributed are left untouched
// - Every PR title and free-text value in standalone output is HTML-escaped
// errors: Template read failures propagate with the path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::dates::Lang;
use crate::model::{Category, ChartSeries, Charts, ReportDocument};
use crate::util::escape_html;

/// Look-behind window used to attribute a `labels: [...]` literal to a chart.
pub const LABELS_WINDOW: usize = 200;
/// Look-behind window used to attribute a `data: [...]` literal to a chart.
pub const DATA_WINDOW: usize = 300;

pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

static RE_LABELS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"labels:\s*\[['"][^\[\]]*['"]\]"#).unwrap());
static RE_DATA: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"data:\s*\[\d+(?:\.?\d*)?(?:,\s*\d+(?:\.?\d*)?)*\]").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
  Template(PathBuf),
  Standalone,
}

#[derive(Debug, Clone)]
pub struct Rendered {
  pub html: String,
  pub mode: RenderMode,
}

/// Absolute templates are used as-is; relative ones hang off `base_dir`.
pub fn resolve_template_path(base_dir: &Path, template: &Path) -> PathBuf {
  if template.is_absolute() {
    template.to_path_buf()
  } else {
    base_dir.join(template)
  }
}

pub fn render_report(doc: &ReportDocument, template_path: &Path, lang: Lang) -> Result<Rendered> {
  if !template_path.exists() {
    warn!(
      "Template not found at {}; set --template or --base-dir (env HARVEST_BASE_DIR). Generating standalone HTML",
      template_path.display()
    );
    return Ok(Rendered { html: render_standalone(doc, lang), mode: RenderMode::Standalone });
  }

  let template = std::fs::read_to_string(template_path)
    .with_context(|| format!("reading template {}", template_path.display()))?;
  debug!(path = %template_path.display(), "filling template");

  Ok(Rendered {
    html: apply_template(&template, doc),
    mode: RenderMode::Template(template_path.to_path_buf()),
  })
}

pub fn apply_template(template: &str, doc: &ReportDocument) -> String {
  let html = substitute_placeholders(template, doc);
  replace_chart_arrays(&html, &doc.charts)
}

/// Global literal replacement of the nine report tokens.
pub fn substitute_placeholders(template: &str, doc: &ReportDocument) -> String {
  let replacements: [(&str, String); 9] = [
    ("{{PROJECT_NAME}}", escape_html(&doc.meta.project_name)),
    ("{{AUTHOR}}", escape_html(&doc.meta.author)),
    ("{{START_DATE}}", doc.meta.start_date_formatted.clone()),
    ("{{END_DATE}}", doc.meta.end_date_formatted.clone()),
    ("{{GENERATED_DATE}}", doc.meta.generated_at_formatted.clone()),
    ("{{TOTAL_TASKS}}", doc.summary.total_tasks.to_string()),
    ("{{TOTAL_HOURS}}", format!("{:.1}", doc.summary.total_hours)),
    ("{{TOTAL_ADDITIONS}}", doc.summary.total_additions.clone()),
    ("{{COMPLETION_RATE}}", doc.summary.completion_rate.clone()),
  ];

  replacements
    .iter()
    .fold(template.to_string(), |html, (token, value)| html.replace(token, value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartTarget {
  Daily,
  Category,
}

fn attribute_chart(window: &str) -> Option<ChartTarget> {
  if window.contains("daily") || window.contains("Daily") {
    Some(ChartTarget::Daily)
  } else if window.contains("category") || window.contains("Category") {
    Some(ChartTarget::Category)
  } else {
    None
  }
}

fn series_for(charts: &Charts, target: ChartTarget) -> &ChartSeries {
  match target {
    ChartTarget::Daily => &charts.daily,
    ChartTarget::Category => &charts.category,
  }
}

/// The `width` characters of `text` that end at byte offset `end`.
fn preceding_window(text: &str, end: usize, width: usize) -> &str {
  let head = &text[..end];
  if width == 0 {
    return "";
  }
  let start = head.char_indices().rev().nth(width - 1).map(|(i, _)| i).unwrap_or(0);
  &head[start..]
}

fn json_array<T: serde::Serialize>(values: &[T]) -> String {
  serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn rewrite_literals<F>(html: &str, re: &Regex, window: usize, render: F) -> String
where
  F: Fn(ChartTarget) -> String,
{
  re.replace_all(html, |caps: &Captures| {
    let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
    match attribute_chart(preceding_window(html, start, window)) {
      Some(target) => render(target),
      None => caps[0].to_string(),
    }
  })
  .into_owned()
}

/// Swap the placeholder chart arrays in embedded script for computed series.
pub fn replace_chart_arrays(html: &str, charts: &Charts) -> String {
  let html = rewrite_literals(html, &RE_LABELS, LABELS_WINDOW, |t| {
    format!("labels: {}", json_array(&series_for(charts, t).labels))
  });
  rewrite_literals(&html, &RE_DATA, DATA_WINDOW, |t| {
    format!("data: {}", json_array(&series_for(charts, t).data))
  })
}

// --- Standalone document ---

struct Labels {
  html_lang: &'static str,
  title: &'static str,
  period: &'static str,
  assignee: &'static str,
  tasks_done: &'static str,
  total_hours: &'static str,
  lines_added: &'static str,
  completion: &'static str,
  daily_chart: &'static str,
  category_chart: &'static str,
  task_name: &'static str,
  category: &'static str,
  hours: &'static str,
  done_date: &'static str,
  status: &'static str,
  done: &'static str,
  created: &'static str,
  font_family: &'static str,
}

const JA: Labels = Labels {
  html_lang: "ja",
  title: "作業報告書",
  period: "報告期間",
  assignee: "担当者",
  tasks_done: "完了タスク",
  total_hours: "総工数",
  lines_added: "追加行数",
  completion: "完了率",
  daily_chart: "Daily Work Hours",
  category_chart: "Category Distribution",
  task_name: "タスク名",
  category: "カテゴリ",
  hours: "工数",
  done_date: "完了日",
  status: "状態",
  done: "完了",
  created: "作成",
  font_family: "'Hiragino Kaku Gothic ProN', 'Yu Gothic', sans-serif",
};

const EN: Labels = Labels {
  html_lang: "en",
  title: "Work Report",
  period: "Period",
  assignee: "Assignee",
  tasks_done: "Tasks Done",
  total_hours: "Total Hours",
  lines_added: "Lines Added",
  completion: "Completion",
  daily_chart: "Daily Work Hours",
  category_chart: "Category Distribution",
  task_name: "Task",
  category: "Category",
  hours: "Hours",
  done_date: "Merged",
  status: "Status",
  done: "Done",
  created: "generated",
  font_family: "'Helvetica Neue', Arial, sans-serif",
};

fn labels_for(lang: Lang) -> &'static Labels {
  match lang {
    Lang::Ja => &JA,
    Lang::En => &EN,
  }
}

/// Badge colors (background, text); categories without their own pair use `other`'s.
fn category_colors(cat: Category) -> (&'static str, &'static str) {
  match cat {
    Category::Feat => ("#d4edda", "#155724"),
    Category::Fix => ("#f8d7da", "#721c24"),
    Category::Refactor => ("#e2d5f1", "#4a2c7a"),
    Category::Docs => ("#fff3cd", "#856404"),
    Category::Test => ("#cce5ff", "#004085"),
    _ => ("#e9ecef", "#495057"),
  }
}

fn inline_css(font_family: &str) -> String {
  let base = r#"
    @page { size: A4; margin: 15mm 12mm; }
    @media print { body { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body { font-size: 10pt; line-height: 1.65; color: #1a1a2e; background: #fff; width: 210mm; margin: 0 auto; padding: 15mm 12mm; }
    h1 { font-size: 24pt; text-align: center; margin-bottom: 6px; color: #16213e; }
    h2 { font-size: 11pt; border-left: 4px solid #16213e; padding-left: 12px; margin: 28px 0 16px; color: #16213e; }
    .subtitle { text-align: center; font-size: 10pt; color: #5a6a7a; margin-bottom: 8px; }
    .report-header { text-align: center; padding-bottom: 20px; margin-bottom: 24px; border-bottom: 2px solid #16213e; }
    .report-meta { display: flex; justify-content: center; gap: 40px; margin-top: 16px; }
    .meta-item { text-align: center; }
    .meta-label { font-size: 8pt; color: #8a9aaa; text-transform: uppercase; }
    .meta-value { font-size: 10pt; font-weight: 600; color: #16213e; }
    .summary-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin: 24px 0; }
    .summary-card { background: #f8f9fb; border: 1px solid #e4e8ed; border-radius: 8px; padding: 20px 16px; text-align: center; }
    .summary-card.primary { border-top: 3px solid #16213e; }
    .summary-value { font-size: 28pt; font-weight: 700; color: #16213e; }
    .summary-unit { font-size: 12pt; color: #5a6a7a; }
    .summary-label { font-size: 8pt; color: #7a8a9a; text-transform: uppercase; margin-top: 8px; }
    .chart-row { display: grid; grid-template-columns: 1.2fr 0.8fr; gap: 20px; margin: 24px 0; }
    .chart-box { background: #fafbfc; border: 1px solid #e4e8ed; border-radius: 8px; padding: 20px; }
    .chart-title { font-size: 9pt; font-weight: 600; color: #3a4a5a; text-align: center; margin-bottom: 16px; text-transform: uppercase; }
    .chart-wrapper { height: 200px; position: relative; }
    table { width: 100%; border-collapse: collapse; margin: 16px 0; font-size: 9pt; }
    thead tr { background: linear-gradient(180deg, #16213e, #1a2a3e); }
    th { color: #fff; font-weight: 600; padding: 12px 10px; text-align: left; font-size: 8pt; text-transform: uppercase; }
    td { padding: 11px 10px; border-bottom: 1px solid #e8ebee; }
    tbody tr:nth-child(even) { background: #fafbfc; }
    tfoot tr { background: #f0f2f5; }
    tfoot td { font-weight: 600; border-top: 2px solid #16213e; }
    .text-right { text-align: right; }
    .text-center { text-align: center; }
    .mono { font-family: "SF Mono", Monaco, monospace; }
    .status-badge { display: inline-block; font-size: 7pt; font-weight: 600; padding: 3px 10px; border-radius: 12px; }
    .status-complete { background: #d4edda; color: #155724; }
    .category-badge { display: inline-block; font-size: 7pt; font-weight: 600; padding: 3px 8px; border-radius: 3px; }
    .report-footer { margin-top: 40px; padding-top: 16px; border-top: 1px solid #e4e8ed; display: flex; justify-content: space-between; font-size: 8pt; color: #9aa; }
"#;
  format!("\n    body {{ font-family: {}; }}{}", font_family, base)
}

fn render_rows(doc: &ReportDocument, l: &Labels) -> String {
  doc
    .prs
    .iter()
    .map(|pr| {
      let (bg, color) = category_colors(pr.category);
      format!(
        r#"
        <tr>
          <td class="text-center">{no}</td>
          <td>{title}</td>
          <td class="text-center"><span class="category-badge" style="background:{bg};color:{color}">{cat}</span></td>
          <td class="text-right mono">{hours:.1}h</td>
          <td class="text-center">{date}</td>
          <td class="text-center"><span class="status-badge status-complete">{done}</span></td>
        </tr>"#,
        no = pr.no,
        title = escape_html(&pr.title),
        bg = bg,
        color = color,
        cat = pr.category.as_str().to_uppercase(),
        hours = pr.hours,
        date = escape_html(&pr.merged_date),
        done = l.done,
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn render_chart_script(charts: &Charts, font_family: &str) -> String {
  format!(
    r#"
    Chart.defaults.font.family = "{font}";

    new Chart(document.getElementById('dailyChart'), {{
      type: 'bar',
      data: {{
        labels: {daily_labels},
        datasets: [{{
          data: {daily_data},
          backgroundColor: '#16213e',
          borderRadius: 4
        }}]
      }},
      options: {{
        responsive: true,
        maintainAspectRatio: false,
        plugins: {{ legend: {{ display: false }} }},
        scales: {{
          y: {{ beginAtZero: true, grid: {{ color: 'rgba(0,0,0,0.04)' }} }},
          x: {{ grid: {{ display: false }} }}
        }}
      }}
    }});

    new Chart(document.getElementById('categoryChart'), {{
      type: 'doughnut',
      data: {{
        labels: {category_labels},
        datasets: [{{
          data: {category_data},
          backgroundColor: ['#1e6f5c', '#c49000', '#b33939', '#6c5ce7', '#0984e3', '#636e72'],
          borderWidth: 2
        }}]
      }},
      options: {{
        responsive: true,
        maintainAspectRatio: false,
        cutout: '60%',
        plugins: {{
          legend: {{ position: 'bottom', labels: {{ font: {{ size: 9 }}, padding: 12 }} }}
        }}
      }}
    }});
"#,
    font = font_family,
    daily_labels = json_array(&charts.daily.labels),
    daily_data = json_array(&charts.daily.data),
    category_labels = json_array(&charts.category.labels),
    category_data = json_array(&charts.category.data),
  )
}

/// Self-contained A4 report used when no template is available.
pub fn render_standalone(doc: &ReportDocument, lang: Lang) -> String {
  let l = labels_for(lang);
  let project = escape_html(&doc.meta.project_name);

  format!(
    r#"<!DOCTYPE html>
<html lang="{html_lang}">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title} - {project}</title>
  <script src="{cdn}"></script>
  <style>{css}  </style>
</head>
<body>
  <header class="report-header">
    <h1>{title}</h1>
    <p class="subtitle">{project}</p>
    <div class="report-meta">
      <div class="meta-item">
        <div class="meta-label">{period}</div>
        <div class="meta-value">{start} — {end}</div>
      </div>
      <div class="meta-item">
        <div class="meta-label">{assignee}</div>
        <div class="meta-value">{author}</div>
      </div>
    </div>
  </header>

  <section>
    <h2>Executive Summary</h2>
    <div class="summary-grid">
      <div class="summary-card primary">
        <div class="summary-value">{tasks}</div>
        <div class="summary-label">{tasks_done}</div>
      </div>
      <div class="summary-card">
        <div class="summary-value">{hours:.1}<span class="summary-unit">h</span></div>
        <div class="summary-label">{total_hours}</div>
      </div>
      <div class="summary-card">
        <div class="summary-value">{additions}</div>
        <div class="summary-label">{lines_added}</div>
      </div>
      <div class="summary-card">
        <div class="summary-value">{rate}</div>
        <div class="summary-label">{completion}</div>
      </div>
    </div>
  </section>

  <section>
    <h2>Activity Analysis</h2>
    <div class="chart-row">
      <div class="chart-box">
        <div class="chart-title">{daily_chart}</div>
        <div class="chart-wrapper"><canvas id="dailyChart"></canvas></div>
      </div>
      <div class="chart-box">
        <div class="chart-title">{category_chart}</div>
        <div class="chart-wrapper"><canvas id="categoryChart"></canvas></div>
      </div>
    </div>
  </section>

  <section>
    <h2>Work Details</h2>
    <table>
      <thead>
        <tr>
          <th style="width:36px" class="text-center">No</th>
          <th>{task_name}</th>
          <th style="width:72px" class="text-center">{category}</th>
          <th style="width:56px" class="text-right">{hours_label}</th>
          <th style="width:64px" class="text-center">{done_date}</th>
          <th style="width:64px" class="text-center">{status}</th>
        </tr>
      </thead>
      <tbody>
{rows}
      </tbody>
      <tfoot>
        <tr>
          <td colspan="3" class="text-right">Total</td>
          <td class="text-right mono">{hours:.1}h</td>
          <td colspan="2"></td>
        </tr>
      </tfoot>
    </table>
  </section>

  <footer class="report-footer">
    <div>Generated by harvest-report</div>
    <div>{generated} {created}</div>
  </footer>

  <script>{script}  </script>
</body>
</html>
"#,
    html_lang = l.html_lang,
    title = l.title,
    project = project,
    cdn = CHART_JS_CDN,
    css = inline_css(l.font_family),
    period = l.period,
    start = escape_html(&doc.meta.start_date_formatted),
    end = escape_html(&doc.meta.end_date_formatted),
    assignee = l.assignee,
    author = escape_html(&doc.meta.author),
    tasks = doc.summary.total_tasks,
    tasks_done = l.tasks_done,
    hours = doc.summary.total_hours,
    total_hours = l.total_hours,
    additions = escape_html(&doc.summary.total_additions),
    lines_added = l.lines_added,
    rate = escape_html(&doc.summary.completion_rate),
    completion = l.completion,
    daily_chart = l.daily_chart,
    category_chart = l.category_chart,
    task_name = l.task_name,
    category = l.category,
    hours_label = l.hours,
    done_date = l.done_date,
    status = l.status,
    rows = render_rows(doc, l),
    generated = escape_html(&doc.meta.generated_at_formatted),
    created = l.created,
    script = render_chart_script(&doc.charts, l.font_family),
  )
}
