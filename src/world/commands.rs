use super::*;

pub(crate) struct AddRequest {
    pub world_path: PathBuf,
    pub template_id: String,
    pub transforms_path: PathBuf,
    pub replace: bool,
    pub yes: bool,
}

pub(crate) struct DeleteRequest {
    pub world_path: PathBuf,
    pub selector: DeleteSelector,
    pub yes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DeleteSelector {
    Blueprint(String),
    IdFile(PathBuf),
}

impl DeleteSelector {
    pub fn from_flags(blueprint: Option<String>, ids: Option<PathBuf>) -> Result<Self, WorldError> {
        match (blueprint, ids) {
            (Some(bp), None) => Ok(DeleteSelector::Blueprint(bp)),
            (None, Some(path)) => Ok(DeleteSelector::IdFile(path)),
            _ => Err(WorldError::Usage(
                "Delete requires exactly one of --blueprint <name> or --ids <path>".to_string(),
            )),
        }
    }
}

/// What a command changed, reported after the file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Summary {
    pub world_file: String,
    pub blueprint: Option<String>,
    pub removed: usize,
    pub added: Option<usize>,
    pub total: usize,
    pub missing_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Applied(Summary),
    NoOp { missing_ids: Vec<String> },
    Cancelled,
}

impl Outcome {
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            Outcome::Applied(s) => {
                lines.push(format!("Updated {}", s.world_file));
                if let Some(bp) = &s.blueprint {
                    lines.push(format!("Blueprint: {bp}"));
                }
                lines.push(format!("Removed: {}", s.removed));
                if let Some(added) = s.added {
                    lines.push(format!("Added: {added}"));
                }
                lines.push(format!("Total entities: {}", s.total));
                if !s.missing_ids.is_empty() {
                    lines.push(format!("Missing IDs: {}", s.missing_ids.len()));
                }
            }
            Outcome::NoOp { missing_ids } => {
                lines.push("No changes applied (no-op acknowledged with --yes).".to_string());
                if !missing_ids.is_empty() {
                    lines.push(format!("Missing IDs: {}", missing_ids.len()));
                }
            }
            Outcome::Cancelled => lines.push("Cancelled.".to_string()),
        }
        lines
    }
}

/// The entity set an add would produce, before confirmation.
#[derive(Debug, Clone)]
pub(crate) struct AddPlan {
    pub base: Vec<Entity>,
    pub added: Vec<Entity>,
    pub removed: usize,
}

/// The entity set a delete would keep, before confirmation.
#[derive(Debug, Clone)]
pub(crate) struct DeletePlan {
    pub keep: Vec<Entity>,
    pub removed: usize,
    pub missing_ids: Vec<String>,
    pub summary: String,
}

pub(crate) enum DeleteTarget {
    Blueprint(String),
    Ids(Vec<String>),
}

pub(crate) fn resolve_template<'w>(
    world: &'w WorldDocument,
    template_id: &str,
) -> Result<(&'w Entity, &'w str), WorldError> {
    let template = world
        .find(template_id)
        .ok_or_else(|| WorldError::NotFound {
            kind: "Template entity",
            id: template_id.to_string(),
        })?;
    let blueprint = validate_template(template)?;
    Ok((template, blueprint))
}

/// Validates the whole batch first, then assigns ids and clones the template.
pub(crate) fn plan_add(
    world: &WorldDocument,
    template: &Entity,
    blueprint: &str,
    raw_transforms: &[Value],
    replace: bool,
) -> Result<AddPlan, WorldError> {
    let transforms = validate_transforms(raw_transforms)?;

    let base: Vec<Entity> = if replace {
        world
            .entities
            .iter()
            .filter(|e| e.blueprint() != Some(blueprint))
            .cloned()
            .collect()
    } else {
        world.entities.clone()
    };
    let removed = world.entities.len() - base.len();

    let mut known: HashSet<String> = base
        .iter()
        .filter_map(|e| e.id().map(str::to_string))
        .collect();
    let mut added = Vec::with_capacity(transforms.len());
    for (index, transform) in transforms.iter().enumerate() {
        let id = match &transform.id {
            Some(id) if known.contains(id) => {
                return Err(WorldError::Conflict(format!(
                    "Transform #{index} id already exists in world: {id}"
                )))
            }
            Some(id) => id.clone(),
            None => generate_unique_id(&known)?,
        };
        added.push(clone_from_template(template, transform, &id));
        known.insert(id);
    }

    Ok(AddPlan {
        base,
        added,
        removed,
    })
}

pub(crate) fn plan_delete(world: &WorldDocument, target: &DeleteTarget) -> DeletePlan {
    match target {
        DeleteTarget::Blueprint(blueprint) => {
            let keep: Vec<Entity> = world
                .entities
                .iter()
                .filter(|e| e.blueprint() != Some(blueprint.as_str()))
                .cloned()
                .collect();
            let removed = world.entities.len() - keep.len();
            DeletePlan {
                keep,
                removed,
                missing_ids: Vec::new(),
                summary: format!("Delete {removed} entities with blueprint \"{blueprint}\"."),
            }
        }
        DeleteTarget::Ids(ids) => {
            let requested: HashSet<&str> = ids.iter().map(String::as_str).collect();
            let mut found: HashSet<&str> = HashSet::new();
            let mut keep = Vec::with_capacity(world.entities.len());
            for entity in &world.entities {
                match entity.id() {
                    Some(id) if requested.contains(id) => {
                        found.insert(id);
                    }
                    _ => keep.push(entity.clone()),
                }
            }
            let mut seen = HashSet::new();
            let missing_ids: Vec<String> = ids
                .iter()
                .filter(|id| !found.contains(id.as_str()) && seen.insert(id.as_str()))
                .cloned()
                .collect();
            let removed = world.entities.len() - keep.len();
            DeletePlan {
                keep,
                removed,
                missing_ids,
                summary: format!(
                    "Delete {removed} entities by explicit ID list ({} requested).",
                    ids.len()
                ),
            }
        }
    }
}

pub(crate) fn run_add(req: &AddRequest, prompt: &mut dyn Prompt) -> Result<Outcome, WorldError> {
    let mut world = load(&req.world_path)?;
    let (template, blueprint) = resolve_template(&world, &req.template_id)?;
    let blueprint = blueprint.to_string();
    let raw_transforms = read_transforms(&req.transforms_path)?;
    let plan = plan_add(&world, template, &blueprint, &raw_transforms, req.replace)?;

    if plan.removed == 0 && plan.added.is_empty() {
        if !req.yes {
            return Err(WorldError::NoOp("No changes to apply."));
        }
        return Ok(Outcome::NoOp {
            missing_ids: Vec::new(),
        });
    }

    if req.replace {
        let summary = format!(
            "Replace mode will delete {} existing \"{blueprint}\" entities, then add {}.",
            plan.removed,
            plan.added.len()
        );
        if confirm(req.yes, &summary, prompt)? == Decision::Cancelled {
            return Ok(Outcome::Cancelled);
        }
    }

    let added = plan.added.len();
    world.entities = plan.base;
    world.entities.extend(plan.added);
    commit(&req.world_path, &world)?;
    info!(
        "added {added} \"{blueprint}\" entities (removed {}) in {}",
        plan.removed,
        req.world_path.display()
    );

    Ok(Outcome::Applied(Summary {
        world_file: file_label(&req.world_path),
        blueprint: Some(blueprint),
        removed: plan.removed,
        added: Some(added),
        total: world.entities.len(),
        missing_ids: Vec::new(),
    }))
}

pub(crate) fn run_delete(
    req: &DeleteRequest,
    prompt: &mut dyn Prompt,
) -> Result<Outcome, WorldError> {
    let mut world = load(&req.world_path)?;
    let target = match &req.selector {
        DeleteSelector::Blueprint(bp) => DeleteTarget::Blueprint(bp.clone()),
        DeleteSelector::IdFile(path) => DeleteTarget::Ids(read_id_list(path)?),
    };
    let plan = plan_delete(&world, &target);
    if !plan.missing_ids.is_empty() {
        info!(
            "{} requested ids not found: {}",
            plan.missing_ids.len(),
            plan.missing_ids.join(", ")
        );
    }

    if plan.removed == 0 {
        if !req.yes {
            return Err(WorldError::NoOp("No matching entities to delete."));
        }
        return Ok(Outcome::NoOp {
            missing_ids: plan.missing_ids,
        });
    }

    if confirm(req.yes, &plan.summary, prompt)? == Decision::Cancelled {
        return Ok(Outcome::Cancelled);
    }

    world.entities = plan.keep;
    commit(&req.world_path, &world)?;
    info!(
        "deleted {} entities from {}",
        plan.removed,
        req.world_path.display()
    );

    Ok(Outcome::Applied(Summary {
        world_file: file_label(&req.world_path),
        blueprint: None,
        removed: plan.removed,
        added: None,
        total: world.entities.len(),
        missing_ids: plan.missing_ids,
    }))
}

// Last check before anything touches the disk.
fn commit(path: &Path, world: &WorldDocument) -> Result<(), WorldError> {
    let mut seen = HashSet::new();
    for id in world.entities.iter().filter_map(Entity::id) {
        if !seen.insert(id) {
            return Err(WorldError::Conflict(format!(
                "Duplicate entity id in world: {id}"
            )));
        }
    }
    persist(path, world)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
