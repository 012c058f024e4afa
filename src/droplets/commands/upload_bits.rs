use crate::archive::Archiver;
use crate::commands::{name_and_value, CmdMessage, CmdResult, ExitCode};
use crate::error::DropletError;
use crate::pipeline::Pipeline;
use crate::resolve::resolve_artifact;
use crate::store::DropletRunner;
use std::cell::Cell;
use std::ops::ControlFlow;
use std::path::Path;

pub const USAGE: &str = "droplets upload-bits DROPLET_NAME PATH";

pub fn run<R: DropletRunner>(runner: &mut R, archiver: &Archiver, args: &[String]) -> CmdResult {
    let (name, path) = match name_and_value(args, USAGE) {
        Ok(parsed) => parsed,
        Err(usage) => return usage,
    };

    let path = Path::new(path);
    let artifact = Cell::new(None);
    Pipeline::new()
        .step("package", |result| match resolve_artifact(path, archiver) {
            Ok(resolved) => {
                artifact.set(Some(resolved.path));
                ControlFlow::Continue(())
            }
            Err(err) => {
                report_open_error(result, path, &err);
                ControlFlow::Break(())
            }
        })
        .step("upload", |result| match artifact.take() {
            Some(artifact) => upload(runner, name, &artifact, result),
            None => ControlFlow::Break(()),
        })
        .run()
}

/// Packaging failures are reported against the path the user asked for.
pub(crate) fn report_open_error(result: &mut CmdResult, path: &Path, err: &DropletError) {
    let message = match err {
        DropletError::PathNotFound(_) => format!("Error opening {}", path.display()),
        other => format!("Error opening {}: {}", path.display(), other),
    };
    result.fail(message, ExitCode::FileSystemError);
}

pub(crate) fn upload<R: DropletRunner + ?Sized>(
    runner: &mut R,
    name: &str,
    artifact: &Path,
    result: &mut CmdResult,
) -> ControlFlow<()> {
    match runner.upload_bits(name, artifact) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!("Successfully uploaded {}", name)));
            ControlFlow::Continue(())
        }
        Err(err) => {
            result.fail(
                format!("Error uploading to {}: {}", name, err),
                ExitCode::CommandFailed,
            );
            ControlFlow::Break(())
        }
    }
}
