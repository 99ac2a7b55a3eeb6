use std::path::PathBuf;

use crate::cli::CheckArgs;
use crate::config::CliConfig;
use crate::diagnostic::render_compile_error;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::{discover_form_files, FormFile};

/// Run the `check` command: compile every form file and report defects.
///
/// Files that cannot be read or parsed count as failures alongside compile
/// errors; every file is checked before the command exits.
pub fn run(args: CheckArgs, config: &CliConfig, output: &OutputContext) -> Result<(), CliError> {
    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(&config.cli.default_form_dir)]
    } else {
        args.paths
    };
    let files = discover_form_files(&paths)?;

    let mut failed = 0usize;
    let mut results: Vec<serde_json::Value> = Vec::new();

    for path in &files {
        let filename = path.display().to_string();
        let outcome = FormFile::load(path).and_then(|file| file.compile().map(|c| (file, c)));

        match outcome {
            Ok((file, contract)) => {
                tracing::debug!(file = %filename, fields = contract.fields.len(), "form compiles");
                match output.mode {
                    OutputMode::Human => output.status(&format!(
                        "  {filename} .... {} fields",
                        contract.fields.len()
                    )),
                    OutputMode::Json => results.push(serde_json::json!({
                        "file": filename,
                        "title": file.form.title,
                        "fields": contract.fields.len(),
                        "error": null,
                    })),
                    OutputMode::Plain => println!("{filename}\tok\t{}", contract.fields.len()),
                }
            }
            Err(err) => {
                failed += 1;
                match output.mode {
                    OutputMode::Human => match &err {
                        CliError::Compile {
                            error, source_text, ..
                        } => {
                            let report = render_compile_error(error, source_text, &filename);
                            eprintln!("{report:?}");
                        }
                        other => output.print_error(other),
                    },
                    OutputMode::Json => results.push(serde_json::json!({
                        "file": filename,
                        "error": err.to_json(),
                    })),
                    OutputMode::Plain => println!("{filename}\terror\t{err}"),
                }
            }
        }
    }

    match output.mode {
        OutputMode::Human => {
            let summary = format!("{} form files checked, {failed} failed", files.len());
            if failed > 0 {
                output.warn(&summary);
            } else {
                output.success(&summary);
            }
        }
        OutputMode::Json => output.print_json(&serde_json::json!({
            "files": files.len(),
            "failed": failed,
            "results": results,
        })),
        OutputMode::Plain => {}
    }

    if failed > 0 {
        Err(CliError::CheckFailed {
            failed,
            total: files.len(),
        })
    } else {
        Ok(())
    }
}
