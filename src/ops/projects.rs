//! Projects table operations, including the image sub-verbs.

use serde_json::Value;

use crate::backend::Record;
use crate::command::ImageCommand;
use crate::schema::{vocab, TableConfig, PROJECTS};
use crate::state::IMAGE_UPLOAD_KEY;

use super::common::effective_images;
use super::error::{OpError, OpResult};
use super::{OpCtx, TableOps};

pub struct ProjectOps;

impl TableOps for ProjectOps {
    fn config(&self) -> &'static TableConfig {
        &PROJECTS
    }

    fn summary(&self, record: &Record) -> String {
        let name = record
            .get_str("name")
            .unwrap_or_else(|| "(no name)".to_string());
        let status = record
            .get_str("status")
            .unwrap_or_else(|| "no status".to_string());
        match record.get_str("description") {
            Some(description) => format!("{} [{}]: {}", name, status, description),
            None => format!("{} [{}]", name, status),
        }
    }

    fn creation_hints(&self) -> String {
        format!(
            "status values: {}\ntechStack values: {}\nrequired to create: name, description",
            vocab::PROJECT_STATUSES.join(", "),
            vocab::vocab_hint(vocab::TECH_STACK, 12)
        )
    }

    /// `git image add/list/remove`.
    ///
    /// Direct `http(s)://` sources are staged immediately; anything else
    /// is marked for upload and resolved at commit time.
    fn image(&self, cmd: &ImageCommand, ctx: &mut OpCtx<'_>) -> OpResult<String> {
        match cmd {
            ImageCommand::Add(source) => {
                if source.starts_with("http://") || source.starts_with("https://") {
                    let mut images = effective_images(ctx.state);
                    images.push(source.clone());
                    let count = images.len();
                    ctx.state.stage(
                        "images",
                        Value::Array(images.into_iter().map(Value::String).collect()),
                    );
                    Ok(format!(
                        "staged image {} ({} total after commit)",
                        source, count
                    ))
                } else {
                    ctx.state
                        .stage(IMAGE_UPLOAD_KEY, Value::String(source.clone()));
                    Ok(format!(
                        "marked '{}' for upload; it will be attached on commit",
                        source
                    ))
                }
            }
            ImageCommand::List => {
                let images = effective_images(ctx.state);
                if images.is_empty() {
                    return Ok("no images attached or staged".to_string());
                }
                let mut out = format!("images ({}):", images.len());
                for (index, url) in images.iter().enumerate() {
                    out.push_str(&format!("\n  [{}] {}", index, url));
                }
                Ok(out)
            }
            ImageCommand::Remove(index) => {
                let mut images = effective_images(ctx.state);
                if images.is_empty() {
                    return Err(OpError::NoImages);
                }
                if *index >= images.len() {
                    return Err(OpError::ImageIndexOutOfRange {
                        index: *index,
                        max: images.len() - 1,
                    });
                }
                let removed = images.remove(*index);
                let remaining = images.len();
                ctx.state.stage(
                    "images",
                    Value::Array(images.into_iter().map(Value::String).collect()),
                );
                Ok(format!(
                    "staged removal of {} ({} image(s) will remain after commit)",
                    removed, remaining
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FieldMap, MutationExecutor, RecordId};
    use crate::ops::testing::RecordingExecutor;
    use crate::schema::TableKey;
    use crate::state::GitState;
    use serde_json::json;

    fn project_record(images: &[&str]) -> Record {
        let mut fields = FieldMap::new();
        fields.insert("name".to_string(), json!("Site"));
        fields.insert("description".to_string(), json!("A site"));
        fields.insert(
            "images".to_string(),
            Value::Array(images.iter().map(|s| json!(s)).collect()),
        );
        Record::new(RecordId::new("p1").unwrap(), fields)
    }

    fn ctx<'a>(
        state: &'a mut GitState,
        records: &'a [Record],
        executor: &'a RecordingExecutor,
    ) -> OpCtx<'a> {
        OpCtx {
            state,
            records,
            executor,
            user: Some("alice"),
        }
    }

    #[test]
    fn test_image_add_url_stages_immediately() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.set_target(project_record(&["https://cdn.example.com/a.png"]));

        let mut c = ctx(&mut state, &[], &executor);
        let reply = ProjectOps
            .image(&ImageCommand::Add("https://cdn.example.com/b.png".to_string()), &mut c)
            .unwrap();
        assert!(reply.contains("2 total"));
        assert_eq!(
            state.staged.get("images"),
            Some(&json!([
                "https://cdn.example.com/a.png",
                "https://cdn.example.com/b.png"
            ]))
        );
    }

    #[test]
    fn test_image_add_path_defers_to_commit() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);

        let mut c = ctx(&mut state, &[], &executor);
        let reply = ProjectOps
            .image(&ImageCommand::Add("./screenshot.png".to_string()), &mut c)
            .unwrap();
        assert!(reply.contains("upload"));
        assert_eq!(state.staged.get(IMAGE_UPLOAD_KEY), Some(&json!("./screenshot.png")));
        assert_eq!(executor.uploads.get(), 0);
    }

    #[test]
    fn test_image_list_and_remove() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.set_target(project_record(&["https://a.png", "https://b.png"]));

        let mut c = ctx(&mut state, &[], &executor);
        let listing = ProjectOps.image(&ImageCommand::List, &mut c).unwrap();
        assert!(listing.contains("[0] https://a.png"));
        assert!(listing.contains("[1] https://b.png"));

        let mut c = ctx(&mut state, &[], &executor);
        let reply = ProjectOps.image(&ImageCommand::Remove(0), &mut c).unwrap();
        assert!(reply.contains("https://a.png"));
        assert_eq!(state.staged.get("images"), Some(&json!(["https://b.png"])));
    }

    #[test]
    fn test_image_remove_out_of_range() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.set_target(project_record(&["https://a.png"]));

        let mut c = ctx(&mut state, &[], &executor);
        match ProjectOps.image(&ImageCommand::Remove(5), &mut c) {
            Err(OpError::ImageIndexOutOfRange { index: 5, max: 0 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_commit_resolves_pending_upload() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.stage("name", json!("Site"));
        state.stage("description", json!("A site"));
        state.stage(IMAGE_UPLOAD_KEY, json!("./shot.png"));

        let reply = {
            let mut c = ctx(&mut state, &[], &executor);
            ProjectOps.commit(None, &mut c).unwrap()
        };
        assert!(reply.contains("Created new project"));
        assert_eq!(executor.uploads.get(), 1);
        assert_eq!(executor.creates.get(), 1);

        let created = executor.last_create.borrow().clone().unwrap();
        let images = created.get("images").unwrap().as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert!(images[0].as_str().unwrap().starts_with("memory://uploads/"));
        assert!(!created.contains_key(IMAGE_UPLOAD_KEY));
    }

    #[test]
    fn test_commit_checks_preconditions_before_uploading() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.stage("name", json!("Site"));
        state.stage(IMAGE_UPLOAD_KEY, json!("./shot.png"));

        // `description` is missing: the commit aborts before any
        // executor call, so no upload slot is reserved.
        let result = {
            let mut c = ctx(&mut state, &[], &executor);
            ProjectOps.commit(None, &mut c)
        };
        match result {
            Err(OpError::MissingRequired { missing, .. }) => {
                assert_eq!(missing, "description");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(executor.uploads.get(), 0);
        assert_eq!(executor.creates.get(), 0);
        assert_eq!(state.staged.len(), 2);
    }

    #[test]
    fn test_commit_without_user_skips_upload() {
        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.stage("name", json!("Site"));
        state.stage("description", json!("A site"));
        state.stage(IMAGE_UPLOAD_KEY, json!("./shot.png"));

        let result = {
            let mut c = OpCtx {
                state: &mut state,
                records: &[],
                executor: &executor,
                user: None,
            };
            ProjectOps.commit(None, &mut c)
        };
        assert!(matches!(result, Err(OpError::NoUser)));
        assert_eq!(executor.uploads.get(), 0);
        assert_eq!(executor.creates.get(), 0);
    }

    #[test]
    fn test_failed_upload_keeps_staging() {
        use crate::backend::MutationError;

        let executor = RecordingExecutor::new();
        let mut state = GitState::new();
        state.switch_table(TableKey::Projects);
        state.stage("name", json!("Site"));
        state.stage("description", json!("A site"));
        state.stage(IMAGE_UPLOAD_KEY, json!("./shot.png"));
        *executor.fail_next.borrow_mut() =
            Some(MutationError::UploadFailed("disk full".to_string()));

        let result = {
            let mut c = ctx(&mut state, &[], &executor);
            ProjectOps.commit(None, &mut c)
        };
        assert!(matches!(
            result,
            Err(OpError::Mutation { op: "image upload", .. })
        ));
        // Marker and fields survive for retry.
        assert_eq!(state.staged.len(), 3);
        assert_eq!(executor.creates.get(), 0);

        // Retry succeeds once the backend recovers.
        let reply = {
            let mut c = ctx(&mut state, &[], &executor);
            ProjectOps.commit(None, &mut c).unwrap()
        };
        assert!(reply.contains("Created new project"));
        assert!(executor
            .inner
            .query(TableKey::Projects, "alice")
            .unwrap()
            .len()
            == 1);
    }
}
