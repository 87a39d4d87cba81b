//! Interactive command parsing.

use anyhow::{Context, Result, bail};

use crate::model::{ExecutionMode, PromptField};
use crate::orchestrator::Intent;

/// Slash command definition (shown by `/help`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashCommand {
    /// Command name, including the leading `/` (for example, `/help`).
    pub name: &'static str,
    /// Argument synopsis
    pub args: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

/// All available slash commands
pub const SLASH_COMMANDS: &[SlashCommand] = &[
    SlashCommand {
        name: "/mode",
        args: "single|multi",
        description: "Switch execution mode (clears the selection)",
    },
    SlashCommand {
        name: "/select",
        args: "ID...",
        description: "Select models by identifier (clears the last result)",
    },
    SlashCommand {
        name: "/image",
        args: "[URL]",
        description: "Attach an image reference, or clear it",
    },
    SlashCommand {
        name: "/audio",
        args: "[URL]",
        description: "Attach an audio reference, or clear it",
    },
    SlashCommand {
        name: "/run",
        args: "",
        description: "Execute the prompt against the selection",
    },
    SlashCommand {
        name: "/models",
        args: "",
        description: "Refresh and list the model catalog",
    },
    SlashCommand {
        name: "/status",
        args: "",
        description: "Show mode, selection, prompt, and last outcome",
    },
    SlashCommand {
        name: "/help",
        args: "",
        description: "Show help",
    },
    SlashCommand {
        name: "/quit",
        args: "",
        description: "Exit the shell",
    },
];

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the prompt text (any line not starting with `/`).
    Prompt(String),
    /// `/mode`
    Mode(ExecutionMode),
    /// `/select`
    Select(Vec<String>),
    /// `/image`; empty clears the reference
    Image(String),
    /// `/audio`; empty clears the reference
    Audio(String),
    /// `/run`
    Run,
    /// `/models`
    Models,
    /// `/status`
    Status,
    /// `/help`
    Help,
    /// `/quit`
    Quit,
}

impl Command {
    /// The orchestrator intent this command maps to, if any.
    ///
    /// `/status`, `/help`, and `/quit` only affect the shell itself.
    #[must_use]
    pub fn into_intent(self) -> Option<Intent> {
        match self {
            Self::Prompt(text) => Some(Intent::SetPrompt(PromptField::Text, text)),
            Self::Mode(mode) => Some(Intent::SetMode(mode)),
            Self::Select(ids) => Some(Intent::SetSelection(ids)),
            Self::Image(url) => Some(Intent::SetPrompt(PromptField::ImageUrl, url)),
            Self::Audio(url) => Some(Intent::SetPrompt(PromptField::AudioUrl, url)),
            Self::Run => Some(Intent::Execute),
            Self::Models => Some(Intent::LoadCatalog),
            Self::Status | Self::Help | Self::Quit => None,
        }
    }
}

/// Parse one line of shell input.
///
/// Blank lines yield `Ok(None)`. Slash command arguments use shell-style
/// quoting, so `/select "model with spaces" other` selects two models.
///
/// # Errors
///
/// Returns an error for unknown commands, malformed quoting, or bad arguments.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !trimmed.starts_with('/') {
        return Ok(Some(Command::Prompt(trimmed.to_string())));
    }

    let argv = shell_words::split(trimmed).context("Failed to parse command line")?;
    let Some((name, args)) = argv.split_first() else {
        bail!("Command line produced no argv items");
    };

    let command = match name.as_str() {
        "/mode" => {
            let [mode] = args else {
                bail!("Usage: /mode single|multi");
            };
            Command::Mode(mode.parse()?)
        }
        "/select" => Command::Select(args.to_vec()),
        "/image" => Command::Image(single_optional(name, args)?),
        "/audio" => Command::Audio(single_optional(name, args)?),
        "/run" => Command::Run,
        "/models" => Command::Models,
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => bail!("Unknown command {other} (try /help)"),
    };
    Ok(Some(command))
}

fn single_optional(name: &str, args: &[String]) -> Result<String> {
    match args {
        [] => Ok(String::new()),
        [value] => Ok(value.clone()),
        _ => bail!("Usage: {name} [URL]"),
    }
}
