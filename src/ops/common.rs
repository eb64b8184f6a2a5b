//! Shared operation logic.
//!
//! The staging/commit/confirmation machinery is identical across entity
//! kinds; tables differ only in schema hooks and a handful of
//! overrides, so the machinery lives here once.

use serde_json::Value;

use crate::backend::{render_value, FieldMap, Record};
use crate::command::AddArgs;
use crate::schema::{FieldKind, TableConfig};
use crate::state::{GitState, IMAGE_UPLOAD_KEY};
use crate::validate::validate_field;

use super::error::{OpError, OpResult};
use super::{OpCtx, TableOps};

/// `git add`: either `-m <id>` targeting or a `<field>=<value>` staging.
pub fn add<T: TableOps + ?Sized>(
    ops: &T,
    args: &AddArgs,
    ctx: &mut OpCtx<'_>,
) -> OpResult<String> {
    match args {
        AddArgs::Target(id) => target(ops, id, ctx),
        AddArgs::Assign { field, value } => {
            let config = ops.config();
            let mut coerced = validate_field(config, field, value)?;

            // Text lists union with whatever is already staged or on
            // the record; everything else replaces.
            if let Some(def) = config.field(field) {
                if def.kind == FieldKind::TextList {
                    coerced = union_lists(existing_value(ctx, field), coerced);
                }
            }

            let rendered = render_value(&coerced);
            ctx.state.stage(field.clone(), coerced);

            Ok(match &ctx.state.context.target {
                Some(record) => {
                    format!("staged {} = {} for record {}", field, rendered, record.id)
                }
                None => format!("staged {} = {} (new record)", field, rendered),
            })
        }
    }
}

/// `git status`: staged fields as `old -> new` pairs.
pub fn status(config: &TableConfig, state: &GitState) -> OpResult<String> {
    if state.staged.is_empty() {
        return Ok(format!("nothing staged for {}", config.display_name));
    }

    let mut out = match &state.context.target {
        Some(record) => format!(
            "Staged changes for {} record {}:",
            config.display_name, record.id
        ),
        None => format!("Staged changes for new {} record:", config.key.singular()),
    };
    for (field, new_value) in &state.staged {
        out.push_str(&format!(
            "\n  {}: {} -> {}",
            field,
            old_value(state, field),
            render_value(new_value)
        ));
    }
    Ok(out)
}

/// `git diff`: the same pairing as `status`, as unified-diff-style lines.
pub fn diff(config: &TableConfig, state: &GitState) -> OpResult<String> {
    if state.staged.is_empty() {
        return Ok(format!("nothing to diff for {}", config.display_name));
    }

    let mut out = format!("diff for {}:", config.display_name);
    for (field, new_value) in &state.staged {
        out.push_str(&format!("\n- {}: {}", field, old_value(state, field)));
        out.push_str(&format!("\n+ {}: {}", field, render_value(new_value)));
    }
    Ok(out)
}

/// `git show`: one summary line per loaded record.
pub fn show<T: TableOps + ?Sized>(ops: &T, records: &[Record]) -> OpResult<String> {
    let config = ops.config();
    if records.is_empty() {
        return Ok(format!(
            "No {} records yet.\n{}",
            config.display_name,
            ops.creation_hints()
        ));
    }

    let mut out = format!("{} ({}):", config.display_name, records.len());
    for record in records {
        out.push_str(&format!("\n  [{}] {}", record.id, ops.summary(record)));
    }
    Ok(out)
}

/// `git add -m <id>`: target an existing record for modification.
///
/// Staged edits survive targeting so `add` before `target` works.
pub fn target<T: TableOps + ?Sized>(
    ops: &T,
    id: &str,
    ctx: &mut OpCtx<'_>,
) -> OpResult<String> {
    let config = ops.config();
    if !config.can_target {
        return Err(OpError::TargetUnsupported(config.display_name));
    }

    let record = ctx
        .records
        .iter()
        .find(|r| r.id.as_str() == id)
        .cloned()
        .ok_or_else(|| OpError::RecordNotFound {
            table: config.display_name,
            id: id.to_string(),
        })?;

    let summary = ops.summary(&record);
    let reply = format!(
        "now modifying {} {}: {}",
        config.key.singular(),
        record.id,
        summary
    );
    ctx.state.set_target(record);
    Ok(reply)
}

/// `git commit`: send staged changes through the mutation executor.
pub fn commit<T: TableOps + ?Sized>(
    ops: &T,
    message: Option<&str>,
    ctx: &mut OpCtx<'_>,
) -> OpResult<String> {
    let config = ops.config();
    if ctx.state.staged.is_empty() {
        return Ok("nothing to commit (stage fields with 'git add <field>=<value>')".to_string());
    }

    // All preconditions are checked before anything reaches the
    // executor: a commit that is going to abort must not upload.
    let target = ctx
        .state
        .context
        .modifying
        .then(|| ctx.state.context.target.clone())
        .flatten();
    if target.is_some() {
        if !config.can_update {
            return Err(OpError::UpdateUnsupported(config.display_name));
        }
    } else {
        if !config.can_create {
            return Err(OpError::CreateUnsupported(config.display_name));
        }
        let missing: Vec<&str> = config
            .required
            .iter()
            .filter(|name| !ctx.state.staged.contains_key(**name))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(OpError::MissingRequired {
                table: config.key.singular(),
                missing: missing.join(", "),
            });
        }
        if ctx.user.is_none() {
            return Err(OpError::NoUser);
        }
    }

    // Resolve on a copy so a failed mutation leaves staging untouched.
    let fields = resolve_outgoing_fields(ctx)?;

    if let Some(target) = target {
        ctx.executor
            .update(config.key, &target.id, &fields)
            .map_err(OpError::mutation("update"))?;
        let names: Vec<&str> = fields.keys().map(String::as_str).collect();
        ctx.state.complete_mutation();
        return Ok(format!(
            "Updated {} {} ({} field(s): {}){}",
            config.key.singular(),
            target.id,
            names.len(),
            names.join(", "),
            message_suffix(message)
        ));
    }

    let owner = ctx.user.ok_or(OpError::NoUser)?;
    let record = ctx
        .executor
        .create(config.key, owner, &fields)
        .map_err(OpError::mutation("create"))?;
    ctx.state.complete_mutation();

    let identity = record
        .get_str(config.identity_field)
        .unwrap_or_else(|| record.id.to_string());
    Ok(format!(
        "Created new {} '{}' ({}){}",
        config.key.singular(),
        identity,
        record.id,
        message_suffix(message)
    ))
}

/// `git reset`: unconditionally discard staged changes and detarget.
pub fn reset(config: &TableConfig, state: &mut GitState) -> OpResult<String> {
    let discarded = state.reset();
    if discarded == 0 {
        Ok(format!("nothing to reset for {}", config.display_name))
    } else {
        Ok(format!(
            "discarded {} staged field(s) and cleared targeting",
            discarded
        ))
    }
}

/// `git rm`: the two-step deletion confirmation protocol.
///
/// The pending-confirmation sub-state is an explicit flag, so an `rm`
/// issued without a preceding prompt always re-prompts instead of
/// deleting.
pub fn rm<T: TableOps + ?Sized>(
    ops: &T,
    answer: Option<&str>,
    ctx: &mut OpCtx<'_>,
) -> OpResult<String> {
    let config = ops.config();
    if !config.can_delete {
        return Err(OpError::DeleteUnsupported(config.display_name));
    }
    let target = ctx
        .state
        .context
        .target
        .clone()
        .ok_or(OpError::NoTarget)?;

    let prompt = |ctx: &mut OpCtx<'_>| {
        ctx.state.context.pending_deletion = true;
        format!(
            "delete {} {} ({})? Confirm with 'git rm yes' or cancel with 'git rm no'",
            config.key.singular(),
            target.id,
            ops.summary(&target)
        )
    };

    let Some(answer) = answer else {
        return Ok(prompt(ctx));
    };
    if !ctx.state.context.pending_deletion {
        // No prompt outstanding; the token is ignored and a fresh
        // confirmation is requested.
        return Ok(prompt(ctx));
    }

    match answer.to_lowercase().as_str() {
        "yes" | "y" => {
            ctx.executor
                .delete(config.key, &target.id)
                .map_err(OpError::mutation("delete"))?;
            ctx.state.complete_mutation();
            Ok(format!("deleted {} {}", config.key.singular(), target.id))
        }
        "no" | "n" => {
            ctx.state.cancel_pending_deletion();
            Ok("deletion cancelled".to_string())
        }
        other => Ok(format!(
            "invalid response '{}'. Answer 'git rm yes' or 'git rm no'",
            other
        )),
    }
}

/// Images currently visible to `image list`/`remove`: staged list if
/// present, else the target record's, else empty.
pub fn effective_images(state: &GitState) -> Vec<String> {
    let staged = state.staged.get("images");
    let value = staged.or_else(|| {
        state
            .context
            .target
            .as_ref()
            .and_then(|r| r.get("images"))
    });
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn old_value(state: &GitState, field: &str) -> String {
    state
        .context
        .target
        .as_ref()
        .and_then(|r| r.get(field))
        .map(render_value)
        .unwrap_or_else(|| "(empty)".to_string())
}

fn existing_value(ctx: &OpCtx<'_>, field: &str) -> Option<Value> {
    ctx.state
        .staged
        .get(field)
        .or_else(|| {
            ctx.state
                .context
                .target
                .as_ref()
                .and_then(|r| r.get(field))
        })
        .cloned()
}

/// Union two string lists, keeping first-seen order and dropping
/// duplicates.
fn union_lists(existing: Option<Value>, new: Value) -> Value {
    let mut seen: Vec<String> = Vec::new();
    let mut push_all = |value: &Value| {
        if let Value::Array(items) = value {
            for item in items {
                if let Some(s) = item.as_str() {
                    if !seen.iter().any(|e| e == s) {
                        seen.push(s.to_string());
                    }
                }
            }
        }
    };
    if let Some(existing) = &existing {
        push_all(existing);
    }
    push_all(&new);
    Value::Array(seen.into_iter().map(Value::String).collect())
}

/// Build the outgoing field map, resolving a pending image upload
/// through the executor. State is not touched: on failure the staged
/// upload marker survives for retry.
fn resolve_outgoing_fields(ctx: &OpCtx<'_>) -> OpResult<FieldMap> {
    let mut fields: FieldMap = ctx.state.staged.clone();
    if fields.remove(IMAGE_UPLOAD_KEY).is_none() {
        return Ok(fields);
    }

    let handle = ctx
        .executor
        .generate_upload_target()
        .map_err(OpError::mutation("image upload"))?;
    let uploaded = ctx
        .executor
        .resolve_uploaded_url(&handle)
        .map_err(OpError::mutation("image upload"))?;

    let mut images = match fields.get("images") {
        Some(Value::Array(items)) => items.clone(),
        _ => match ctx
            .state
            .context
            .target
            .as_ref()
            .and_then(|r| r.get("images"))
        {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
    };
    images.push(Value::String(uploaded));
    fields.insert("images".to_string(), Value::Array(images));
    Ok(fields)
}

fn message_suffix(message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!("\n  message: \"{}\"", msg),
        _ => String::new(),
    }
}
