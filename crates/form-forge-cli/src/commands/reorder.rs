use form_forge_core::types::FormDefinition;

use crate::cli::ReorderArgs;
use crate::error::CliError;
use crate::output::{OutputContext, OutputMode};

use super::FormFile;

/// Run the `reorder` command: move one field and renumber the form.
///
/// `--to` counts positions in display order. The result must still compile;
/// a move that puts a dependent field above its controller is refused.
pub fn run(args: ReorderArgs, output: &OutputContext) -> Result<(), CliError> {
    let mut file = FormFile::load(&args.file)?;
    move_by_name(&mut file.form, &args.field, args.to).map_err(|e| match e {
        MoveError::UnknownField => CliError::FieldNotFound {
            name: args.field.clone(),
            file: args.file.clone(),
        },
        MoveError::Order(e) => CliError::Order(e),
    })?;

    let rendered = render_with_fields(&file.source_text, &file.form)?;
    file.source_text = rendered.clone();
    file.compile()?;

    if args.write {
        std::fs::write(&args.file, format!("{rendered}\n")).map_err(|e| CliError::Io {
            path: args.file.clone(),
            source: e,
        })?;
        tracing::info!(file = %args.file.display(), field = %args.field, to = args.to, "reordered form");
        match output.mode {
            OutputMode::Json => output.print_json(&serde_json::json!({
                "file": args.file.display().to_string(),
                "field": args.field,
                "to": args.to,
            })),
            _ => output.success(&format!(
                "moved '{}' to position {} in {}",
                args.field,
                args.to,
                args.file.display()
            )),
        }
    } else {
        println!("{rendered}");
    }
    Ok(())
}

/// Re-renders the source document with only its `fields` replaced, so keys
/// the author never wrote (a generated id, timestamps) are not added.
fn render_with_fields(source_text: &str, form: &FormDefinition) -> Result<String, CliError> {
    let mut document: serde_json::Value =
        serde_json::from_str(source_text).map_err(|e| CliError::Other(e.to_string()))?;
    let fields = serde_json::to_value(&form.fields).map_err(|e| CliError::Other(e.to_string()))?;
    let object = document.as_object_mut().ok_or_else(|| CliError::InvalidInput {
        message: "form definition must be a JSON object".to_string(),
    })?;
    object.insert("fields".to_string(), fields);
    serde_json::to_string_pretty(&document).map_err(|e| CliError::Other(e.to_string()))
}

#[derive(Debug, PartialEq)]
enum MoveError {
    UnknownField,
    Order(form_forge_core::OrderError),
}

/// Moves `name` to display position `to`.
fn move_by_name(form: &mut FormDefinition, name: &str, to: usize) -> Result<(), MoveError> {
    let from = form.position(name).ok_or(MoveError::UnknownField)?;
    form.move_field(from, to).map_err(MoveError::Order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_forge_core::types::{FieldDefinition, FieldName, FieldType};
    use form_forge_core::OrderError;

    fn form() -> FormDefinition {
        let field = |name: &str, order| {
            FieldDefinition::new(FieldName::new(name).unwrap(), name, FieldType::Text, order)
        };
        // Stored out of display order on purpose.
        FormDefinition::new("F", "D", vec![field("b", 5), field("a", 1), field("c", 9)])
    }

    fn names(form: &FormDefinition) -> Vec<(String, i64)> {
        form.fields
            .iter()
            .map(|f| (f.name.to_string(), f.order))
            .collect()
    }

    #[test]
    fn moves_in_display_order() {
        let mut f = form();
        move_by_name(&mut f, "c", 0).unwrap();
        assert_eq!(
            names(&f),
            vec![("c".into(), 0), ("a".into(), 1), ("b".into(), 2)]
        );
    }

    #[test]
    fn rendering_keeps_only_authored_keys() {
        let source = r#"{"title": "F", "description": "D", "fields": [
            {"name": "a", "label": "a", "type": "text", "order": 0},
            {"name": "b", "label": "b", "type": "text", "order": 1}
        ]}"#;
        let mut f: FormDefinition = serde_json::from_str(source).unwrap();
        move_by_name(&mut f, "b", 0).unwrap();
        let rendered = render_with_fields(source, &f).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "description", "fields"]);
        assert_eq!(json["fields"][0]["name"], "b");
        assert_eq!(json["fields"][0]["order"], 0);
    }

    #[test]
    fn rendering_keeps_authored_id() {
        let id = form_forge_core::FormId::new().to_string();
        let source = format!(
            r#"{{"id": "{id}", "title": "F", "description": "D", "fields": [
                {{"name": "a", "label": "a", "type": "text", "order": 3}}
            ]}}"#
        );
        let mut f: FormDefinition = serde_json::from_str(&source).unwrap();
        move_by_name(&mut f, "a", 0).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_with_fields(&source, &f).unwrap()).unwrap();
        assert_eq!(json["id"], id.as_str());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["fields"][0]["order"], 0);
    }

    #[test]
    fn unknown_field() {
        assert_eq!(
            move_by_name(&mut form(), "zzz", 0),
            Err(MoveError::UnknownField)
        );
    }

    #[test]
    fn target_out_of_range() {
        assert_eq!(
            move_by_name(&mut form(), "a", 3),
            Err(MoveError::Order(OrderError::IndexOutOfRange { index: 3, len: 3 }))
        );
    }
}
