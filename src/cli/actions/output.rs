use crate::forms::{FailureKind, FormView, MemoryView, NavigationMode, SubmitOutcome};
use anyhow::{anyhow, Result};

/// Lines describing what the form showed: the banner, shown or pending, and
/// every navigation performed.
pub(super) fn render(view: &MemoryView) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(state) = view.ui_state().message {
        lines.push(state.message.to_string());
    }

    for (target, mode) in view.navigations() {
        let mode = match mode {
            NavigationMode::Replace => "replace",
            NavigationMode::Assign => "assign",
        };
        lines.push(format!("redirect ({mode}): {target}"));
    }

    lines
}

pub(super) fn print(view: &MemoryView) {
    for line in render(view) {
        println!("{line}");
    }
}

/// Turns a submission outcome into the command's result.
pub(super) fn status(outcome: SubmitOutcome) -> Result<()> {
    match outcome {
        SubmitOutcome::Succeeded => Ok(()),
        SubmitOutcome::Ignored => Err(anyhow!("a submission is already in progress")),
        SubmitOutcome::Rejected => Err(anyhow!("invalid input")),
        SubmitOutcome::Failed(FailureKind::Server) => Err(anyhow!("rejected by the server")),
        SubmitOutcome::Failed(FailureKind::Transport) => {
            Err(anyhow!("could not complete the request"))
        }
    }
}
