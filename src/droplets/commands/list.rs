use crate::commands::{CmdResult, ExitCode};
use crate::listing::sort_droplets;
use crate::store::DropletRunner;

pub fn run<R: DropletRunner>(runner: &R) -> CmdResult {
    match runner.list_droplets() {
        Ok(mut droplets) => {
            sort_droplets(&mut droplets);
            CmdResult::default().with_listed_droplets(droplets)
        }
        Err(err) => {
            let mut result = CmdResult::default();
            result.fail(
                format!("Error listing droplets: {}", err),
                ExitCode::CommandFailed,
            );
            result
        }
    }
}
