use std::path::Path;

use form_forge_core::types::SubmissionData;
use form_forge_core::validate;

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::{read_text, FormFile};

/// Run the `validate` command: check one submission against one form.
pub fn run(args: ValidateArgs, output: &OutputContext) -> Result<(), CliError> {
    let form = FormFile::load(&args.form)?;
    let contract = form.compile()?;
    let data = load_submission(&args.submission)?;

    match validate(&contract, &data) {
        Ok(record) => {
            match output.mode {
                OutputMode::Human => output.success(&format!(
                    "submission accepted ({} values)",
                    record.data().len()
                )),
                OutputMode::Json => output.print_json(&serde_json::json!({ "accepted": true })),
                OutputMode::Plain => println!("accepted"),
            }
            Ok(())
        }
        Err(errors) => {
            match output.mode {
                OutputMode::Human => {
                    for (field, message) in errors.iter() {
                        println!("  {field}: {message}");
                    }
                }
                OutputMode::Json => {
                    let mapping = serde_json::to_value(&errors)
                        .map_err(|e| CliError::Other(e.to_string()))?;
                    output.print_json(&mapping);
                }
                OutputMode::Plain => {
                    for (field, message) in errors.iter() {
                        println!("{field}\t{message}");
                    }
                }
            }
            Err(CliError::Rejected { errors })
        }
    }
}

/// Reads a submission file. The top level must be a JSON object whose
/// values are strings, numbers, booleans or null.
fn load_submission(path: &Path) -> Result<SubmissionData, CliError> {
    let text = read_text(path)?;
    let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| CliError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !value.is_object() {
        return Err(CliError::InvalidInput {
            message: format!("{}: submission must be a JSON object", path.display()),
        });
    }
    serde_json::from_value(value).map_err(|e| CliError::InvalidInput {
        message: format!(
            "{}: values must be strings, numbers, booleans or null ({e})",
            path.display()
        ),
    })
}
