//! Config command - print the effective configuration.

use anyhow::Result;
use clap::Args;

use crate::config::AppConfig;

#[derive(Args)]
pub struct ConfigCmd {
    /// Also print the terms & conditions
    #[arg(long)]
    pub terms: bool,
}

impl ConfigCmd {
    pub fn run(&self, config: &AppConfig) -> Result<()> {
        print!("{}", self.render(config));
        Ok(())
    }

    fn render(&self, config: &AppConfig) -> String {
        let invoice = &config.invoice;
        let business = &invoice.business;
        let source = config
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string());

        let mut lines = vec![
            format!("Config file:    {}", source),
            format!("Data directory: {}", config.data_dir.display()),
            format!("Invoices:       {}", config.invoice_dir.display()),
            format!("Invoice format: {}", invoice.format),
            format!("Business:       {}", business.name),
            format!("Address:        {}", business.address),
            format!("Phone:          {}", business.phone),
            format!("GSTIN:          {}", business.gstin),
            format!("GST rate:       {}", invoice.tax_rate),
            format!("Currency:       {}", invoice.currency_symbol),
            format!(
                "Page layout:    {} columns, {} lines",
                invoice.layout.width, invoice.layout.lines_per_page
            ),
        ];
        if self.terms {
            lines.push("Terms:".to_string());
            lines.extend(
                invoice
                    .terms
                    .iter()
                    .enumerate()
                    .map(|(i, t)| format!("  {}. {}", i + 1, t)),
            );
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
