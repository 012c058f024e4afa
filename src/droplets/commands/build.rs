use crate::archive::Archiver;
use crate::commands::upload_bits::{report_open_error, upload};
use crate::commands::{name_and_value, CmdMessage, CmdResult, ExitCode};
use crate::pipeline::Pipeline;
use crate::store::DropletRunner;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::path::Path;

pub const USAGE: &str = "droplets build-droplet DROPLET_NAME BUILDPACK_URL";

/// Package `source_dir`, upload it as `name`, then request a build.
///
/// The source is always archived, even when it happens to be a single file.
pub fn run<R: DropletRunner>(
    runner: &mut R,
    archiver: &Archiver,
    source_dir: &Path,
    args: &[String],
) -> CmdResult {
    let (name, buildpack_url) = match name_and_value(args, USAGE) {
        Ok(parsed) => parsed,
        Err(usage) => return usage,
    };

    let runner = RefCell::new(runner);
    Pipeline::new()
        .step("upload", |result| {
            let archive = match archiver.archive_dir(source_dir) {
                Ok(archive) => archive,
                Err(err) => {
                    report_open_error(result, source_dir, &err);
                    return ControlFlow::Break(());
                }
            };
            upload(&mut **runner.borrow_mut(), name, &archive, result)
        })
        .step("build", |result| {
            match runner.borrow_mut().build_droplet(name, buildpack_url) {
                Ok(()) => {
                    result.add_message(CmdMessage::success(format!(
                        "Submitted build of {}",
                        name
                    )));
                    ControlFlow::Continue(())
                }
                Err(err) => {
                    result.fail(
                        format!("Error submitting build of {}: {}", name, err),
                        ExitCode::CommandFailed,
                    );
                    ControlFlow::Break(())
                }
            }
        })
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ARCHIVE_SUFFIX;
    use crate::store::memory::RecordingRunner;
    use std::fs;

    const BUILDPACK: &str = "http://some.url/for/buildpack";

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    fn contents(result: &CmdResult) -> Vec<&str> {
        result.messages.iter().map(|m| m.content.as_str()).collect()
    }

    fn source() -> tempfile::TempDir {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("app.sh"), "echo hi").unwrap();
        src
    }

    #[cfg(unix)]
    #[test]
    fn archives_source_uploads_and_builds() {
        use crate::archive::test_support::{assert_sample_entries, read_entries, sample_tree};

        let src = tempfile::tempdir().unwrap();
        sample_tree(src.path());
        let out = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();

        let result = run(
            &mut runner,
            &Archiver::with_temp_dir(out.path()),
            src.path(),
            &args(&["droplet-name", BUILDPACK]),
        );

        assert!(result.is_success());
        assert_eq!(
            contents(&result),
            vec![
                "Successfully uploaded droplet-name",
                "Submitted build of droplet-name"
            ]
        );
        assert_eq!(runner.upload_bits_call_count(), 1);
        let upload = &runner.uploads[0];
        assert_eq!(upload.name, "droplet-name");
        assert!(upload.path.to_string_lossy().ends_with(ARCHIVE_SUFFIX));
        assert_sample_entries(&read_entries(&upload.path));

        assert_eq!(runner.build_droplet_call_count(), 1);
        assert_eq!(runner.builds[0].name, "droplet-name");
        assert_eq!(runner.builds[0].buildpack_url, BUILDPACK);
    }

    #[test]
    fn upload_failure_skips_build() {
        let src = source();
        let out = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        runner.upload_bits_returns("uploading bits failed");

        let result = run(
            &mut runner,
            &Archiver::with_temp_dir(out.path()),
            src.path(),
            &args(&["droplet-name", BUILDPACK]),
        );

        assert_eq!(
            contents(&result),
            vec!["Error uploading to droplet-name: uploading bits failed"]
        );
        assert_eq!(result.failure, Some(ExitCode::CommandFailed));
        assert_eq!(runner.upload_bits_call_count(), 1);
        assert_eq!(runner.build_droplet_call_count(), 0);
    }

    #[test]
    fn build_failure_is_reported_after_upload_success() {
        let src = source();
        let out = tempfile::tempdir().unwrap();
        let mut runner = RecordingRunner::new();
        runner.build_droplet_returns("failed");

        let result = run(
            &mut runner,
            &Archiver::with_temp_dir(out.path()),
            src.path(),
            &args(&["droplet-name", BUILDPACK]),
        );

        assert_eq!(runner.upload_bits_call_count(), 1);
        assert_eq!(runner.build_droplet_call_count(), 1);
        assert_eq!(
            contents(&result),
            vec![
                "Successfully uploaded droplet-name",
                "Error submitting build of droplet-name: failed"
            ]
        );
        assert_eq!(result.failure, Some(ExitCode::CommandFailed));
    }

    #[test]
    fn unreadable_source_makes_no_remote_calls() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let mut runner = RecordingRunner::new();

        let result = run(
            &mut runner,
            &Archiver::with_temp_dir(dir.path()),
            &missing,
            &args(&["droplet-name", BUILDPACK]),
        );

        assert_eq!(result.failure, Some(ExitCode::FileSystemError));
        assert!(contents(&result)[0].starts_with(&format!("Error opening {}", missing.display())));
        assert_eq!(runner.total_call_count(), 0);
    }

    #[test]
    fn rejects_fewer_than_two_arguments() {
        let src = source();
        let mut runner = RecordingRunner::new();

        let result = run(&mut runner, &Archiver::new(), src.path(), &args(&["droplet-name"]));

        assert_eq!(runner.upload_bits_call_count(), 0);
        assert_eq!(runner.build_droplet_call_count(), 0);
        assert!(contents(&result)[0].starts_with("Incorrect Usage"));
        assert_eq!(result.failure, Some(ExitCode::InvalidSyntax));
    }

    #[test]
    fn rejects_empty_droplet_name() {
        let src = source();
        let mut runner = RecordingRunner::new();

        let result = run(
            &mut runner,
            &Archiver::new(),
            src.path(),
            &args(&["", "buildpack-name"]),
        );

        assert!(contents(&result)[0].starts_with("Incorrect Usage"));
        assert_eq!(result.failure, Some(ExitCode::InvalidSyntax));
        assert_eq!(runner.upload_bits_call_count(), 0);
        assert_eq!(runner.build_droplet_call_count(), 0);
    }
}
