use super::*;

/// Builds a new entity from `template`, placed and overridden by `transform`.
///
/// The result owns a deep copy of the template's fields, so nothing done to it reaches the
/// template. Every field the transform doesn't cover is inherited as-is.
pub(crate) fn clone_from_template(template: &Entity, transform: &Transform, id: &str) -> Entity {
    let mut fields = template.fields().cloned().unwrap_or_default();

    fields.insert("id".to_string(), Value::String(id.to_string()));
    if let Some(blueprint) = template.0.get("blueprint") {
        fields.insert("blueprint".to_string(), blueprint.clone());
    }
    fields.insert("position".to_string(), vector_value(&transform.position));
    fields.insert(
        "quaternion".to_string(),
        vector_value(&transform.quaternion.unwrap_or(IDENTITY_QUATERNION)),
    );
    fields.insert(
        "scale".to_string(),
        vector_value(&transform.scale.unwrap_or(UNIT_SCALE)),
    );
    fields.insert(
        "pinned".to_string(),
        Value::Bool(transform.pinned.unwrap_or(false)),
    );
    override_or_inherit(&mut fields, "props", transform.props.as_ref());
    override_or_inherit(&mut fields, "state", transform.state.as_ref());

    Entity(Value::Object(fields))
}

// `fields` already holds the template's copy; a missing or null one becomes `{}`.
fn override_or_inherit(
    fields: &mut Map<String, Value>,
    key: &str,
    replacement: Option<&Map<String, Value>>,
) {
    match replacement {
        Some(value) => {
            fields.insert(key.to_string(), Value::Object(value.clone()));
        }
        None => {
            if fields.get(key).map_or(true, Value::is_null) {
                fields.insert(key.to_string(), Value::Object(Map::new()));
            }
        }
    }
}
