use crate::analysis::domain::{ChartOutcome, FlatTable, RenderedCell, Severity};
use crate::application::read_models::{DashboardReadModel, SummaryView, VulnerabilityView};
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;
use owo_colors::OwoColorize;

/// Widest a regular column may grow, in characters
const COLUMN_WIDTH_CAP: usize = 40;
/// Widest a vulnerability column may grow, in characters
const WIDE_COLUMN_WIDTH_CAP: usize = 100;
/// Width of the longest chart bar
const CHART_BAR_WIDTH: usize = 40;

/// Marks a line break folded into a single-line label
const LINE_BREAK_MARK: &str = "⏎";

/// Escapes control characters so fetched text cannot drive the terminal
fn printable(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_debug());
        } else {
            out.push(c);
        }
    }
    out
}

/// Folds a possibly multi-line value onto one printable line
fn single_line(text: &str) -> String {
    let lines: Vec<String> = text.lines().map(printable).collect();
    lines.join(LINE_BREAK_MARK)
}

/// One grid cell: a line per stacked entry, each optionally tinted by severity
#[derive(Debug, Clone, Default)]
struct GridCell {
    lines: Vec<(String, Option<Severity>)>,
}

impl GridCell {
    fn plain(text: &str) -> Self {
        Self::with_lines(text, None)
    }

    fn tinted(text: &str, severity: Severity) -> Self {
        Self::with_lines(text, Some(severity))
    }

    /// Multi-line text becomes extra grid lines, the way stacked entries do
    fn with_lines(text: &str, severity: Option<Severity>) -> Self {
        Self {
            lines: text.lines().map(|line| (printable(line), severity)).collect(),
        }
    }

    fn from_rendered(cell: RenderedCell) -> Self {
        match cell {
            RenderedCell::Empty => Self::default(),
            RenderedCell::Plain(text) => Self::plain(&text),
            RenderedCell::Annotated { text, severity } => Self::tinted(&text, severity),
            RenderedCell::Stacked(entries) => Self {
                lines: entries
                    .iter()
                    .flat_map(|e| Self::tinted(&e.text, e.severity).lines)
                    .collect(),
            },
        }
    }

    fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|(text, _)| text.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// TerminalFormatter adapter for drawing a dashboard as plain-text tables
///
/// Severity-bearing cells get the severity's background color when color
/// output is enabled. Long cells are truncated to the column cap.
pub struct TerminalFormatter {
    use_color: bool,
}

impl TerminalFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Colors are off when `NO_COLOR` is set or the terminal is dumb
    pub fn color_supported() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    fn heading(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint(&self, padded: &str, severity: Option<Severity>) -> String {
        match severity {
            Some(severity) if self.use_color => {
                let (r, g, b) = severity.background_rgb();
                padded.on_truecolor(r, g, b).black().to_string()
            }
            _ => padded.to_string(),
        }
    }

    fn fit(text: &str, width: usize) -> String {
        let length = text.chars().count();
        if length <= width {
            format!("{}{}", text, " ".repeat(width - length))
        } else if width == 0 {
            String::new()
        } else {
            let kept: String = text.chars().take(width - 1).collect();
            format!("{}…", kept)
        }
    }

    /// Draws a bordered grid; rows grow vertically for stacked cells
    fn render_grid(&self, output: &mut String, headers: &[String], rows: &[Vec<GridCell>]) {
        let headers: Vec<String> = headers.iter().map(|h| single_line(h)).collect();
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let cap = if FlatTable::is_wide_column(header) {
                    WIDE_COLUMN_WIDTH_CAP
                } else {
                    COLUMN_WIDTH_CAP
                };
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(GridCell::width)
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(cap)
            })
            .collect();

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };

        output.push_str(&border("┌", "┬", "┐"));
        let header_cells: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| self.heading(&Self::fit(h, *w)))
            .collect();
        output.push_str(&format!("│ {} │\n", header_cells.join(" │ ")));
        output.push_str(&border("├", "┼", "┤"));

        for row in rows {
            let height = row.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1);
            for line in 0..height {
                let cells: Vec<String> = widths
                    .iter()
                    .enumerate()
                    .map(|(i, width)| {
                        match row.get(i).and_then(|cell| cell.lines.get(line)) {
                            Some((text, severity)) => self.paint(&Self::fit(text, *width), *severity),
                            None => " ".repeat(*width),
                        }
                    })
                    .collect();
                output.push_str(&format!("│ {} │\n", cells.join(" │ ")));
            }
        }
        output.push_str(&border("└", "┴", "┘"));
    }
}

/// Helper methods for rendering sections
impl TerminalFormatter {
    fn render_header(&self, output: &mut String, model: &DashboardReadModel) {
        output.push_str(&format!(
            "{}\n",
            self.heading(&format!("📊 {}", single_line(&model.name)))
        ));
        output.push_str(&format!(
            "{}\n\n",
            self.dim(&format!(
                "   {} · {}",
                single_line(&model.source),
                model.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ))
        ));
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView) {
        if summary.is_empty() {
            return;
        }
        let parts: Vec<String> = summary
            .entries
            .iter()
            .map(|e| format!("{}: {}", self.heading(&e.label), single_line(&e.value)))
            .collect();
        output.push_str(&format!("{}\n\n", parts.join("   ")));
    }

    fn render_chart(&self, output: &mut String, chart: &ChartOutcome) {
        match chart {
            ChartOutcome::NoData => {
                output.push_str(&format!("{}\n\n", self.dim("No data to chart")));
            }
            ChartOutcome::InsufficientData { field } => {
                let message = match field {
                    Some(field) => format!(
                        "Insufficient data to chart: {} has fewer than two distinct values",
                        single_line(field)
                    ),
                    None => "Insufficient data to chart: no field to group by".to_string(),
                };
                output.push_str(&format!("{}\n\n", self.dim(&message)));
            }
            ChartOutcome::Histogram { field, buckets } => {
                output.push_str(&format!(
                    "{}\n",
                    self.heading(&format!("Distribution by {}", single_line(field)))
                ));
                let labels: Vec<String> = buckets.iter().map(|b| single_line(&b.name)).collect();
                let label_width = labels
                    .iter()
                    .map(|label| label.chars().count())
                    .max()
                    .unwrap_or(0)
                    .min(COLUMN_WIDTH_CAP);
                let max = buckets.iter().map(|b| b.value).max().unwrap_or(1).max(1);
                for (bucket, label) in buckets.iter().zip(&labels) {
                    let bar = "█".repeat((bucket.value * CHART_BAR_WIDTH).div_ceil(max));
                    let bar = if self.use_color {
                        bar.cyan().to_string()
                    } else {
                        bar
                    };
                    output.push_str(&format!(
                        "  {} │ {} {}\n",
                        Self::fit(label, label_width),
                        bar,
                        bucket.value
                    ));
                }
                output.push('\n');
            }
        }
    }

    fn render_table(&self, output: &mut String, table: &FlatTable, item_count: usize) {
        output.push_str(&format!(
            "{}\n",
            self.heading(&format!("Records ({})", item_count))
        ));
        if table.is_empty() || table.columns.is_empty() {
            output.push_str(&format!("{}\n\n", self.dim("No tabular data in this document")));
            return;
        }

        let rows: Vec<Vec<GridCell>> = table
            .rows
            .iter()
            .map(|row| {
                table
                    .columns
                    .iter()
                    .map(|column| GridCell::from_rendered(FlatTable::render_cell(row, column)))
                    .collect()
            })
            .collect();
        self.render_grid(output, &table.columns, &rows);
        output.push('\n');
    }

    fn render_vulnerabilities(&self, output: &mut String, vulns: &[VulnerabilityView]) {
        output.push_str(&format!(
            "{}\n",
            self.heading(&format!("Vulnerabilities ({})", vulns.len()))
        ));
        if vulns.is_empty() {
            output.push_str(&format!("{}\n", self.dim("No vulnerabilities found")));
            return;
        }

        let headers: Vec<String> = [
            "IP", "CVE", "CVSS", "Severity", "Port", "Product", "Version", "OWASP Category",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        let rows: Vec<Vec<GridCell>> = vulns
            .iter()
            .map(|v| {
                vec![
                    GridCell::plain(&v.ip),
                    GridCell::plain(&v.cve),
                    GridCell::plain(&v.cvss),
                    GridCell::tinted(v.severity.label(), v.severity),
                    GridCell::plain(&v.port),
                    GridCell::plain(&v.product),
                    GridCell::plain(&v.version),
                    GridCell::plain(&v.owasp_category),
                ]
            })
            .collect();
        self.render_grid(output, &headers, &rows);
    }
}

impl DashboardFormatter for TerminalFormatter {
    fn format(&self, model: &DashboardReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        if model.shows_dashboard() {
            self.render_summary(&mut output, &model.summary);
            self.render_chart(&mut output, &model.chart);
            self.render_table(&mut output, &model.table, model.item_count);
        }
        self.render_vulnerabilities(&mut output, &model.vulnerabilities);

        Ok(output)
    }
}
