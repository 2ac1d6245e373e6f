use crate::analysis::domain::json_display::display_text;
use crate::application::dto::OutputFormat;
use crate::application::use_cases::CreditsReport;
use crate::ports::outbound::{Alert, ResultFile, ScriptCatalog, UploadReceipt};
use crate::shared::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// ListingFormatter - renders the small secondary outputs (result lists,
/// script catalogs, alerts, uploads, account details)
pub struct ListingFormatter {
    format: OutputFormat,
}

impl ListingFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn empty_notice(&self, what: &str) -> String {
        match self.format {
            OutputFormat::Markdown => format!("*No {}*\n", what),
            _ => format!("No {}\n", what),
        }
    }

    pub fn results(&self, results: &[ResultFile]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(results);
        }
        if results.is_empty() {
            return Ok(self.empty_notice("saved results"));
        }

        let mut output = String::new();
        let name_width = results.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
        for (index, result) in results.iter().enumerate() {
            match self.format {
                OutputFormat::Markdown => {
                    output.push_str(&format!("- **{}** `{}`\n", result.name, result.path))
                }
                _ => output.push_str(&format!(
                    "{:>3}. {:<width$}  {}\n",
                    index + 1,
                    result.name,
                    result.path,
                    width = name_width
                )),
            }
        }
        Ok(output)
    }

    pub fn scripts(&self, catalog: &ScriptCatalog) -> Result<String> {
        if self.format == OutputFormat::Json {
            let map: serde_json::Map<String, Value> = catalog
                .scripts
                .iter()
                .map(|(name, schema)| Ok((name.clone(), serde_json::to_value(schema)?)))
                .collect::<Result<_>>()?;
            return Self::json(&map);
        }
        if catalog.scripts.is_empty() {
            return Ok(self.empty_notice("scripts available"));
        }

        let mut output = String::new();
        for (name, schema) in &catalog.scripts {
            let description = schema.description.as_deref().unwrap_or("");
            match self.format {
                OutputFormat::Markdown => {
                    output.push_str(&format!("### {}\n\n{}\n\n", name, description))
                }
                _ => output.push_str(&format!("{}  {}\n", name, description)),
            }
            for param in &schema.params {
                let marker = if param.required { "required" } else { "optional" };
                let mut line = format!("  - {} ({})", param.name, marker);
                if let Some(label) = param.label.as_deref().filter(|l| !l.is_empty()) {
                    line.push_str(&format!(" {}", label));
                }
                if let Some(placeholder) = &param.placeholder {
                    line.push_str(&format!(" [default: {}]", display_text(placeholder)));
                }
                output.push_str(&line);
                output.push('\n');
            }
            if self.format == OutputFormat::Markdown {
                output.push('\n');
            }
        }
        Ok(output)
    }

    pub fn alerts(&self, alerts: &[Alert]) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(alerts);
        }
        if alerts.is_empty() {
            return Ok(self.empty_notice("alerts"));
        }

        let mut output = String::new();
        if self.format == OutputFormat::Markdown {
            output.push_str("| ID | Name | Filter |\n|----|------|--------|\n");
        }
        for alert in alerts {
            let name = alert.name.as_deref().unwrap_or("-");
            match self.format {
                OutputFormat::Markdown => output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    alert.id,
                    name,
                    alert.filter_summary()
                )),
                _ => output.push_str(&format!(
                    "{}  {}  {}\n",
                    alert.id,
                    name,
                    alert.filter_summary()
                )),
            }
        }
        Ok(output)
    }

    pub fn upload(&self, receipt: &UploadReceipt) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(receipt);
        }
        let mut output = format!("Uploaded to {}\n", receipt.path);
        if !receipt.cves.is_empty() {
            output.push_str(&format!("CVEs found: {}\n", receipt.cves.join(", ")));
        }
        Ok(output)
    }

    pub fn credits(&self, report: &CreditsReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(report);
        }
        Ok(match &report.plan {
            Some(plan) => format!("Credits: {} (plan: {})\n", report.credits, plan),
            None => format!("Credits: {}\n", report.credits),
        })
    }

    pub fn public_ip(&self, ip: &str) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Self::json(&json!({ "ip": ip }));
        }
        Ok(format!("{}\n", ip))
    }

    /// Arbitrary backend JSON, always pretty-printed
    pub fn raw(&self, value: &Value) -> Result<String> {
        Self::json(value)
    }
}
