use crate::commands::{CmdMessage, CmdResult, ExitCode};
use crate::store::DropletRunner;

pub fn run<R: DropletRunner>(runner: &mut R, name: &str) -> CmdResult {
    let mut result = CmdResult::default();
    match runner.remove_droplet(name) {
        Ok(()) => result.add_message(CmdMessage::success("Droplet removed")),
        Err(err) => result.fail(
            format!("Error removing {}: {}", name, err),
            ExitCode::CommandFailed,
        ),
    }
    result
}
