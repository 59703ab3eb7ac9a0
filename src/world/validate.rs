use super::*;

/// Checks the world root shape and splits the entity array out of it.
pub(crate) fn validate_world(raw: Value) -> Result<WorldDocument, &'static str> {
    let Value::Object(mut root) = raw else {
        return Err("must contain a JSON object");
    };
    let entities = match root.get_mut("entities") {
        Some(Value::Array(items)) => std::mem::take(items),
        _ => return Err("must contain an \"entities\" array"),
    };
    Ok(WorldDocument {
        root,
        entities: entities.into_iter().map(Entity).collect(),
    })
}

pub(crate) fn validate_transform(raw: &Value, index: usize) -> Result<Transform, ValidationError> {
    let Some(item) = raw.as_object() else {
        return Err(ValidationError::new(
            Subject::transform(index),
            "must be an object",
        ));
    };
    let field = |name| Subject::transform_field(index, name);

    let id = match item.get("id") {
        None => None,
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(_) => {
            return Err(ValidationError::new(
                field("id"),
                "must be a non-empty string",
            ))
        }
    };

    let Some(position) = item.get("position") else {
        return Err(ValidationError::new(
            Subject::transform(index),
            "is missing required field \"position\"",
        ));
    };
    let position = validate_vector::<3>(position, field("position"))?;

    let quaternion = item
        .get("quaternion")
        .map(|v| validate_vector::<4>(v, field("quaternion")))
        .transpose()?;
    let scale = item
        .get("scale")
        .map(|v| validate_vector::<3>(v, field("scale")))
        .transpose()?;
    let pinned = item
        .get("pinned")
        .map(|v| validate_bool(v, field("pinned")))
        .transpose()?;
    let props = item
        .get("props")
        .map(|v| validate_object(v, field("props")))
        .transpose()?;
    let state = item
        .get("state")
        .map(|v| validate_object(v, field("state")))
        .transpose()?;

    Ok(Transform {
        id,
        position,
        quaternion,
        scale,
        pinned,
        props,
        state,
    })
}

/// Validates every item, stopping at the first invalid one.
pub(crate) fn validate_transforms(raw: &[Value]) -> Result<Vec<Transform>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(index, item)| validate_transform(item, index))
        .collect()
}

pub(crate) fn validate_vector<const N: usize>(
    raw: &Value,
    subject: Subject,
) -> Result<[f64; N], ValidationError> {
    let Some(items) = raw.as_array() else {
        return Err(ValidationError::new(
            subject,
            format!("must be an array of {N} numbers"),
        ));
    };
    if items.len() != N {
        return Err(ValidationError::new(
            subject,
            format!("must contain exactly {N} numbers"),
        ));
    }
    let mut out = [0.0; N];
    for (i, (slot, item)) in out.iter_mut().zip(items).enumerate() {
        match item.as_f64() {
            Some(n) if n.is_finite() => *slot = n,
            _ => {
                return Err(ValidationError::new(
                    subject,
                    format!("index {i} must be a finite number"),
                ))
            }
        }
    }
    Ok(out)
}

pub(crate) fn validate_bool(raw: &Value, subject: Subject) -> Result<bool, ValidationError> {
    raw.as_bool()
        .ok_or_else(|| ValidationError::new(subject, "must be boolean"))
}

pub(crate) fn validate_object(
    raw: &Value,
    subject: Subject,
) -> Result<Map<String, Value>, ValidationError> {
    raw.as_object()
        .cloned()
        .ok_or_else(|| ValidationError::new(subject, "must be an object"))
}

pub(crate) fn validate_id_list(raw: &Value) -> Result<Vec<String>, ValidationError> {
    let Some(items) = raw.as_array() else {
        return Err(ValidationError::new(
            Subject::IdList,
            "must be a JSON array of strings",
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.as_str() {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(ValidationError::new(
                Subject::IdItem { index },
                "must be a non-empty string",
            )),
        })
        .collect()
}

/// Returns the template's blueprint, which must be a non-empty string.
pub(crate) fn validate_template(template: &Entity) -> Result<&str, ValidationError> {
    match template.blueprint() {
        Some(bp) if !bp.is_empty() => Ok(bp),
        _ => Err(ValidationError::new(
            Subject::Template {
                id: template.id().unwrap_or_default().to_string(),
            },
            "is missing a valid blueprint",
        )),
    }
}
