use form_forge_core::{Activation, CompiledContract, CompiledField};

use crate::cli::InspectArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::FormFile;

/// Run the `inspect` command: show a form's compiled contract.
pub fn run(args: InspectArgs, output: &OutputContext) -> Result<(), CliError> {
    let file = FormFile::load(&args.file)?;
    let contract = file.compile()?;
    render_contract(&contract, output)
}

fn render_contract(contract: &CompiledContract, output: &OutputContext) -> Result<(), CliError> {
    match output.mode {
        OutputMode::Human => {
            println!("{} ({})", contract.title, contract.form_id);
            println!();
            println!(
                "{:<4} {:<20} {:<10} {:<9} {:<20} {}",
                "#", "Field", "Type", "Required", "Rules", "Active"
            );
            println!(
                "{:<4} {:<20} {:<10} {:<9} {:<20} {}",
                "-", "-----", "----", "--------", "-----", "------"
            );
            for (position, field) in contract.fields.iter().enumerate() {
                println!(
                    "{:<4} {:<20} {:<10} {:<9} {:<20} {}",
                    position,
                    field.name.as_str(),
                    field.field_type.as_str(),
                    if field.required { "yes" } else { "no" },
                    rules_summary(field),
                    activation_summary(&field.activation),
                );
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_value(contract).map_err(|e| CliError::Other(e.to_string()))?;
            output.print_json(&json);
        }
        OutputMode::Plain => {
            for field in &contract.fields {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    field.name,
                    field.field_type,
                    field.required,
                    rules_summary(field),
                    activation_summary(&field.activation),
                );
            }
        }
    }
    Ok(())
}

fn rules_summary(field: &CompiledField) -> String {
    let mut rules = Vec::new();
    if let Some(range) = &field.range_check {
        match (range.min, range.max) {
            (Some(min), Some(max)) => rules.push(format!("{min}..={max}")),
            (Some(min), None) => rules.push(format!(">={min}")),
            (None, Some(max)) => rules.push(format!("<={max}")),
            (None, None) => {}
        }
    }
    if let Some(pattern) = &field.pattern_check {
        rules.push(format!("/{}/", pattern.as_str()));
    }
    if rules.is_empty() {
        "-".to_string()
    } else {
        rules.join(" ")
    }
}

fn activation_summary(activation: &Activation) -> String {
    match activation {
        Activation::Always => "always".to_string(),
        Activation::Equals { field, value } => format!("{field} = {value:?}"),
    }
}
