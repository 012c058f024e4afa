//! Fail-fast sequencing of command steps.
//!
//! A [`Pipeline`] is an ordered list of steps sharing one [`CmdResult`]. Each
//! step appends its own messages and returns [`ControlFlow::Break`] once it has
//! recorded a failure; the remaining steps are then never invoked.

use crate::commands::CmdResult;
use log::debug;
use std::ops::ControlFlow;

type Step<'a> = Box<dyn FnOnce(&mut CmdResult) -> ControlFlow<()> + 'a>;

#[derive(Default)]
pub struct Pipeline<'a> {
    steps: Vec<(&'static str, Step<'a>)>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn step<F>(mut self, label: &'static str, step: F) -> Self
    where
        F: FnOnce(&mut CmdResult) -> ControlFlow<()> + 'a,
    {
        self.steps.push((label, Box::new(step)));
        self
    }

    pub fn run(self) -> CmdResult {
        let mut result = CmdResult::default();
        for (label, step) in self.steps {
            debug!("pipeline step: {}", label);
            if step(&mut result).is_break() {
                debug!("pipeline halted at {}", label);
                break;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CmdMessage, ExitCode};
    use std::cell::Cell;

    #[test]
    fn runs_steps_in_order() {
        let result = Pipeline::new()
            .step("first", |r| {
                r.add_message(CmdMessage::success("one"));
                ControlFlow::Continue(())
            })
            .step("second", |r| {
                r.add_message(CmdMessage::success("two"));
                ControlFlow::Continue(())
            })
            .run();

        let contents: Vec<_> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
        assert!(result.is_success());
    }

    #[test]
    fn break_skips_later_steps() {
        let later_ran = Cell::new(false);
        let result = Pipeline::new()
            .step("failing", |r| {
                r.fail("boom", ExitCode::CommandFailed);
                ControlFlow::Break(())
            })
            .step("never", |_| {
                later_ran.set(true);
                ControlFlow::Continue(())
            })
            .run();

        assert!(!later_ran.get());
        assert_eq!(result.failure, Some(ExitCode::CommandFailed));
    }

    #[test]
    fn empty_pipeline_succeeds() {
        assert!(Pipeline::new().run().is_success());
    }
}
