use crate::analysis::domain::{ChartOutcome, FlatTable, RenderedCell};
use crate::application::read_models::{DashboardReadModel, SummaryView, VulnerabilityView};
use crate::ports::outbound::DashboardFormatter;
use crate::shared::Result;

/// Markdown table header for vulnerability information
const VULN_TABLE_HEADER: &str =
    "| IP | CVE | CVSS | Severity | Port | Product | Version | OWASP Category |\n";

/// Markdown table separator line for vulnerability table
const VULN_TABLE_SEPARATOR: &str =
    "|----|-----|------|----------|------|---------|---------|----------------|\n";

/// Width of the longest chart bar, in block characters
const CHART_BAR_WIDTH: usize = 30;

/// MarkdownFormatter adapter for rendering a dashboard as a Markdown document
///
/// Stacked vulnerability cells are joined with `<br>` so each entry stays
/// on its own line inside the table cell.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters, line breaks and control characters for safe
    /// Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for (i, line) in text.lines().enumerate() {
            if i > 0 {
                escaped.push(' ');
            }
            for c in line.chars() {
                match c {
                    '|' => escaped.push_str("\\|"),
                    c if c.is_control() => escaped.extend(c.escape_debug()),
                    c => escaped.push(c),
                }
            }
        }
        escaped
    }

    fn cell_text(cell: &RenderedCell) -> String {
        match cell {
            RenderedCell::Empty => String::new(),
            RenderedCell::Plain(text) | RenderedCell::Annotated { text, .. } => {
                Self::escape_markdown_table_cell(text)
            }
            RenderedCell::Stacked(entries) => entries
                .iter()
                .map(|e| Self::escape_markdown_table_cell(&e.text))
                .collect::<Vec<_>>()
                .join("<br>"),
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &DashboardReadModel) {
        output.push_str(&format!(
            "# {}\n\n",
            Self::escape_markdown_table_cell(&model.name)
        ));
        output.push_str(&format!(
            "*Source: `{}` · generated {}*\n\n",
            model.source,
            model.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView) {
        if summary.is_empty() {
            return;
        }

        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        for entry in &summary.entries {
            output.push_str(&format!(
                "| {} | {} |\n",
                entry.label,
                Self::escape_markdown_table_cell(&entry.value)
            ));
        }
        output.push('\n');
    }

    fn render_chart(&self, output: &mut String, chart: &ChartOutcome) {
        match chart {
            ChartOutcome::NoData => {
                output.push_str("## Distribution\n\n*No data to chart*\n\n");
            }
            ChartOutcome::InsufficientData { field } => {
                output.push_str("## Distribution\n\n");
                match field {
                    Some(field) => output.push_str(&format!(
                        "*Insufficient data: `{}` has fewer than two distinct values*\n\n",
                        Self::escape_markdown_table_cell(field)
                    )),
                    None => output.push_str("*Insufficient data: no field to group by*\n\n"),
                }
            }
            ChartOutcome::Histogram { field, buckets } => {
                output.push_str(&format!(
                    "## Distribution by `{}`\n\n",
                    Self::escape_markdown_table_cell(field)
                ));
                output.push_str("| Value | Count | |\n");
                output.push_str("|-------|-------|-|\n");
                let max = buckets.iter().map(|b| b.value).max().unwrap_or(1).max(1);
                for bucket in buckets {
                    let width = (bucket.value * CHART_BAR_WIDTH).div_ceil(max);
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        Self::escape_markdown_table_cell(&bucket.name),
                        bucket.value,
                        "█".repeat(width)
                    ));
                }
                output.push('\n');
            }
        }
    }

    fn render_table(&self, output: &mut String, table: &FlatTable, item_count: usize) {
        output.push_str(&format!("## Records ({})\n\n", item_count));

        if table.is_empty() || table.columns.is_empty() {
            output.push_str("*No tabular data in this document*\n\n");
            return;
        }

        let header: Vec<String> = table
            .columns
            .iter()
            .map(|c| Self::escape_markdown_table_cell(c))
            .collect();
        output.push_str(&format!("| {} |\n", header.join(" | ")));
        output.push_str(&format!(
            "|{}\n",
            table.columns.iter().map(|_| "---|").collect::<String>()
        ));

        for row in &table.rows {
            let cells: Vec<String> = table
                .columns
                .iter()
                .map(|column| Self::cell_text(&FlatTable::render_cell(row, column)))
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');
    }

    fn render_vulnerabilities(&self, output: &mut String, vulns: &[VulnerabilityView]) {
        output.push_str(&format!("## Vulnerabilities ({})\n\n", vulns.len()));

        if vulns.is_empty() {
            output.push_str("*No vulnerabilities found*\n\n");
            return;
        }

        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for vuln in vulns {
            self.render_vulnerability_row(output, vuln);
        }
        output.push('\n');
    }

    fn render_vulnerability_row(&self, output: &mut String, vuln: &VulnerabilityView) {
        let cells = [
            vuln.ip.as_str(),
            vuln.cve.as_str(),
            vuln.cvss.as_str(),
            vuln.severity.label(),
            vuln.port.as_str(),
            vuln.product.as_str(),
            vuln.version.as_str(),
            vuln.owasp_category.as_str(),
        ];
        let escaped: Vec<String> = cells
            .iter()
            .map(|c| Self::escape_markdown_table_cell(c))
            .collect();
        output.push_str(&format!("| {} |\n", escaped.join(" | ")));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFormatter for MarkdownFormatter {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ReportView;
    use crate::application::use_cases::DocumentAnalyzer;
    use serde_json::json;

    fn create_test_read_model(view: ReportView) -> DashboardReadModel {
        DocumentAnalyzer::default()
            .analyze(
                "search.json",
                "backend:/r/search.json",
                view,
                json!({
                    "query": "nginx",
                    "matches": [
                        {"ip_str": "1.1.1.1", "port": 80, "org": "A|B",
                         "vulns": [{"cve": "CVE-2021-1", "cvss": 9.8, "product": "nginx", "version": "1.18"},
                                   {"cve": "CVE-2020-2", "cvss": 4.0}]},
                        {"ip_str": "2.2.2.2", "port": 443, "cvss": "7.5"}
                    ]
                }),
            )
            .unwrap()
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new()
            .format(&create_test_read_model(ReportView::Dashboard))
            .unwrap();

        assert!(output.starts_with("# search.json\n"));
        assert!(output.contains("| Query | nginx |"));
        assert!(output.contains("## Distribution by `port`"));
        assert!(output.contains("## Records (2)"));
        assert!(output.contains("| ip_str | port | org | vulns | cvss |"));
        assert!(output.contains("## Vulnerabilities (2)"));
    }

    #[test]
    fn test_markdown_escapes_and_stacks_cells() {
        let output = MarkdownFormatter::new()
            .format(&create_test_read_model(ReportView::Dashboard))
            .unwrap();

        assert!(output.contains("A\\|B"));
        assert!(output.contains("<br>CVE-2020-2 (unknown unknown, CVSS 4, Medium)"));
        assert!(output.contains("7.5 (High)"));
    }

    #[test]
    fn test_vulnerability_rows_use_placeholders() {
        let output = MarkdownFormatter::new()
            .format(&create_test_read_model(ReportView::Vulnerabilities))
            .unwrap();

        assert!(!output.contains("## Records"));
        assert!(output.contains("| - | CVE-2020-2 | 4 | Medium | - | - | - | - |"));
    }

    #[test]
    fn test_empty_document() {
        let model = DocumentAnalyzer::default()
            .analyze("empty.json", "file:empty.json", ReportView::Dashboard, json!({"foo": 1}))
            .unwrap();
        let output = MarkdownFormatter::new().format(&model).unwrap();
        assert!(output.contains("*No data to chart*"));
        assert!(output.contains("*No tabular data in this document*"));
        assert!(output.contains("*No vulnerabilities found*"));
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(
            MarkdownFormatter::escape_markdown_table_cell("a|b\nc"),
            "a\\|b c"
        );
        assert_eq!(
            MarkdownFormatter::escape_markdown_table_cell("OK\r\nServer: \u{1b}[2J\rx"),
            "OK Server: \\u{1b}[2J\\rx"
        );
    }

    #[test]
    fn test_banner_rows_stay_on_one_table_line() {
        let model = DocumentAnalyzer::default()
            .analyze(
                "banners.json",
                "file:banners.json",
                ReportView::Dashboard,
                json!([
                    {"ip": "1.1.1.1", "data": "HTTP/1.1 200 OK\r\nServer: \u{1b}[2Jnginx"},
                    {"ip": "2.2.2.2", "data": "SSH-2.0"}
                ]),
            )
            .unwrap();
        let output = MarkdownFormatter::new().format(&model).unwrap();
        assert!(!output.contains('\u{1b}'));
        assert!(!output.contains('\r'));
        let row = output
            .lines()
            .find(|l| l.contains("HTTP/1.1 200 OK"))
            .unwrap();
        assert!(row.starts_with('|') && row.ends_with('|'));
        assert!(row.contains("Server: \\u{1b}[2Jnginx"));
    }
}
