use crate::commands::{CmdMessage, CmdResult, ExitCode};
use crate::store::DropletRunner;

pub fn run<R: DropletRunner>(runner: &mut R, name: &str) -> CmdResult {
    let mut result = CmdResult::default();
    match runner.launch_droplet(name) {
        Ok(()) => result.add_message(CmdMessage::success("Droplet launched")),
        Err(err) => result.fail(
            format!("Error launching {}: {}", name, err),
            ExitCode::CommandFailed,
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::RecordingRunner;

    #[test]
    fn launches_the_droplet() {
        let mut runner = RecordingRunner::new();

        let result = run(&mut runner, "droplet-name");

        assert!(result.is_success());
        assert_eq!(result.messages[0].content, "Droplet launched");
        assert_eq!(runner.launch_droplet_call_count(), 1);
        assert_eq!(runner.launches[0], "droplet-name");
    }

    #[test]
    fn reports_launch_failure() {
        let mut runner = RecordingRunner::new();
        runner.launch_droplet_returns("failed");

        let result = run(&mut runner, "droplet-name");

        assert_eq!(runner.launch_droplet_call_count(), 1);
        assert_eq!(result.messages[0].content, "Error launching droplet-name: failed");
        assert_eq!(result.failure, Some(ExitCode::CommandFailed));
    }
}
