use crate::model::{validate_name, Droplet};

pub mod build;
pub mod launch;
pub mod list;
pub mod remove;
pub mod upload_bits;

/// Process exit classification for a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    InvalidSyntax,
    CommandFailed,
    FileSystemError,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        match self {
            ExitCode::InvalidSyntax => 1,
            ExitCode::CommandFailed => 2,
            ExitCode::FileSystemError => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of one command invocation.
///
/// Messages are kept in the order they were produced. At most one failure is
/// recorded; later calls to [`CmdResult::fail`] keep the first classification.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub listed_droplets: Vec<Droplet>,
    pub failure: Option<ExitCode>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_droplets(mut self, droplets: Vec<Droplet>) -> Self {
        self.listed_droplets = droplets;
        self
    }

    pub fn fail(&mut self, message: impl Into<String>, exit: ExitCode) {
        self.add_message(CmdMessage::error(message));
        self.failure.get_or_insert(exit);
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn exit_code(&self) -> i32 {
        self.failure.map(ExitCode::code).unwrap_or(0)
    }

    fn usage_error(detail: impl std::fmt::Display, usage: &str) -> Self {
        let mut result = Self::default();
        result.fail(
            format!("Incorrect Usage: {}", detail),
            ExitCode::InvalidSyntax,
        );
        result.add_message(CmdMessage::info(format!("Usage: {}", usage)));
        result
    }
}

/// Checks the `<name> <value>` positional pair shared by upload-bits and
/// build-droplet.
fn name_and_value<'a>(args: &'a [String], usage: &str) -> Result<(&'a str, &'a str), CmdResult> {
    let [name, value] = args else {
        return Err(CmdResult::usage_error(
            format!("expected 2 arguments, got {}", args.len()),
            usage,
        ));
    };
    if let Err(err) = validate_name(name) {
        return Err(CmdResult::usage_error(err, usage));
    }
    Ok((name.as_str(), value.as_str()))
}
