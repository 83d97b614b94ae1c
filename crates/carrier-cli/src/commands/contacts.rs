use crate::OutputFormat;
use anyhow::Result;
use carrier_core::contacts::load_contacts;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ContactSummary<'a> {
    file: String,
    count: usize,
    phones: &'a [String],
}

/// Validate a contact file and preview the recipients a batch would target.
pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let contacts = match load_contacts(file) {
        Ok(contacts) => contacts,
        Err(e) => {
            let err = anyhow::Error::from(e);
            tracing::error!("Failed to load contacts: {:#}", err);
            return Err(err.context(format!("failed to load contacts from {}", file.display())));
        }
    };

    let summary = ContactSummary {
        file: file.display().to_string(),
        count: contacts.len(),
        phones: &contacts,
    };

    match format {
        OutputFormat::Json => output_json(&summary)?,
        OutputFormat::Pretty => output_pretty(&summary),
    }

    Ok(())
}

fn output_json(summary: &ContactSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn output_pretty(summary: &ContactSummary) {
    use console::style;

    println!(
        "\n{}",
        style(format!("Contact file: {}", summary.file)).bold().cyan()
    );
    println!();
    println!("  Recipients: {}", style(summary.count).yellow());

    for (idx, phone) in summary.phones.iter().enumerate() {
        if phone.is_empty() {
            println!("  {:>4}. {}", idx + 1, style("(empty)").dim());
        } else {
            println!("  {:>4}. {}", idx + 1, phone);
        }
    }
}
