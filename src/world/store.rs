use super::*;
use std::io::Write;

pub(crate) fn load(path: &Path) -> Result<WorldDocument, WorldError> {
    let raw = read_json(path, "world file")?;
    let world = validate_world(raw).map_err(|problem| WorldError::Schema {
        label: "World file",
        path: path.to_path_buf(),
        problem,
    })?;
    debug!(
        "loaded {} entities from {}",
        world.entities.len(),
        path.display()
    );
    Ok(world)
}

pub(crate) fn read_transforms(path: &Path) -> Result<Vec<Value>, WorldError> {
    match read_json(path, "transforms file")? {
        Value::Array(items) => Ok(items),
        _ => Err(WorldError::Schema {
            label: "Transforms file",
            path: path.to_path_buf(),
            problem: "must be a JSON array",
        }),
    }
}

pub(crate) fn read_id_list(path: &Path) -> Result<Vec<String>, WorldError> {
    let raw = read_json(path, "IDs file")?;
    Ok(validate_id_list(&raw)?)
}

fn read_json(path: &Path, label: &'static str) -> Result<Value, WorldError> {
    let body = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| WorldError::Parse {
        label,
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `world` to a temp file next to `path`, syncs it, then renames it over `path`.
///
/// Readers only ever see the previous file or the complete new one. The temp file is removed
/// if any step before the rename fails.
pub(crate) fn persist(path: &Path, world: &WorldDocument) -> Result<(), WorldError> {
    let mut body = serde_json::to_string_pretty(world).map_err(WorldError::Encode)?;
    body.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "world.json".to_string());
    let write_err = |source| WorldError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    // Temp files are created owner-only; keep whatever mode the world file already had.
    if let Ok(meta) = std::fs::metadata(path) {
        if let Err(e) = tmp.as_file().set_permissions(meta.permissions()) {
            warn!("could not copy permissions of {}: {e}", path.display());
        }
    }
    tmp.write_all(body.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("wrote {} bytes to {}", body.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn load_reports_missing_file_as_io() {
        let dir = tempdir().expect("tempdir");
        let err = load(&dir.path().join("nope.json")).expect_err("missing file");
        assert!(matches!(err, WorldError::Io { action: "read", .. }));
    }

    #[test]
    fn load_distinguishes_parse_and_schema_errors() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("world.json");

        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(load(&path), Err(WorldError::Parse { .. })));

        std::fs::write(&path, "[]").expect("write");
        assert!(matches!(load(&path), Err(WorldError::Schema { .. })));

        std::fs::write(&path, r#"{"entities": 3}"#).expect("write");
        let err = load(&path).expect_err("entities not an array");
        assert!(err.to_string().ends_with("must contain an \"entities\" array"));
    }

    #[test]
    fn persist_writes_pretty_json_with_trailing_newline() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("world.json");
        std::fs::write(&path, r#"{"entities":[{"id":"A","position":[1,2,3]}]}"#).expect("write");

        let world = load(&path).expect("load");
        persist(&path, &world).expect("persist");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\n  \"entities\": [\n    {\n      \"id\": \"A\""));
        assert_eq!(load(&path).expect("reload"), world);
    }

    #[test]
    fn persist_leaves_no_temp_files_behind() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("world.json");
        std::fs::write(&path, r#"{"entities":[]}"#).expect("write");

        let mut world = load(&path).expect("load");
        world.entities.push(Entity(json!({"id": "B"})));
        persist(&path, &world).expect("persist");

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .expect("read_dir")
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["world.json".to_string()]);
    }

    #[test]
    fn persist_into_missing_directory_keeps_nothing() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("world.json");
        let world = validate_world(json!({"entities": []})).expect("world");
        let err = persist(&path, &world).expect_err("no such directory");
        assert!(matches!(err, WorldError::Io { action: "write", .. }));
        assert!(!path.exists());
    }

    #[test]
    fn transforms_and_id_files_are_shape_checked() {
        let dir = tempdir().expect("tempdir");
        let transforms = dir.path().join("t.json");
        std::fs::write(&transforms, r#"{"position":[0,0,0]}"#).expect("write");
        assert!(matches!(
            read_transforms(&transforms),
            Err(WorldError::Schema { .. })
        ));

        let ids = dir.path().join("ids.json");
        std::fs::write(&ids, r#"["A", 3]"#).expect("write");
        let err = read_id_list(&ids).expect_err("number id");
        assert_eq!(err.to_string(), "IDs file item #1 must be a non-empty string");

        std::fs::write(&ids, r#"["A", "B"]"#).expect("write");
        assert_eq!(read_id_list(&ids).expect("ids"), vec!["A", "B"]);
    }
}
