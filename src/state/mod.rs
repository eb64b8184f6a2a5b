//! State module: the pure staging/targeting state machine.

mod machine;

pub use machine::{GitContext, GitState, TargetMode, IMAGE_UPLOAD_KEY};
