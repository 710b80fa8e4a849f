//! cch - lifecycle hooks for AI coding assistants.
//!
//! One binary, one subcommand per hook event. The host invokes the
//! matching subcommand at each lifecycle point with a JSON payload on
//! stdin and reads the exit code: 0 approved, 1 hook failure, 2 policy
//! denial.

#![forbid(unsafe_code)]

mod context;
mod hooks;

use clap::{Parser, Subcommand};
use cch_common::EnvContext;
use hooks::{EXIT_FAILURE, HookRuntime};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "cch")]
#[command(author, version, about = "Lifecycle hooks for AI coding assistants")]
struct Cli {
    #[command(subcommand)]
    hook: HookCommand,
}

#[derive(Subcommand)]
enum HookCommand {
    /// Gate and record a tool call before it executes.
    PreToolUse(hooks::pre_tool_use::Args),
    /// Record a completed tool call.
    PostToolUse(hooks::post_tool_use::Args),
    /// Record (and optionally validate) a submitted prompt.
    UserPromptSubmit(hooks::user_prompt_submit::Args),
    /// Record a host notification.
    Notification(hooks::notification::Args),
    /// Record the agent stopping.
    Stop(hooks::stop::Args),
    /// Record a subagent stopping.
    SubagentStop(hooks::subagent_stop::Args),
    /// Record a session starting.
    SessionStart(hooks::session_start::Args),
    /// Record an imminent context compaction.
    PreCompact(hooks::pre_compact::Args),
}

impl HookCommand {
    /// Human-readable hook name for diagnostics.
    fn name(&self) -> &'static str {
        match self {
            HookCommand::PreToolUse(_) => "PreToolUse",
            HookCommand::PostToolUse(_) => "PostToolUse",
            HookCommand::UserPromptSubmit(_) => "UserPromptSubmit",
            HookCommand::Notification(_) => "Notification",
            HookCommand::Stop(_) => "Stop",
            HookCommand::SubagentStop(_) => "SubagentStop",
            HookCommand::SessionStart(_) => "SessionStart",
            HookCommand::PreCompact(_) => "PreCompact",
        }
    }

    fn verbose(&self) -> bool {
        match self {
            HookCommand::PreToolUse(args) => args.verbose,
            HookCommand::PostToolUse(args) => args.verbose,
            HookCommand::UserPromptSubmit(args) => args.verbose,
            HookCommand::Notification(args) => args.verbose,
            HookCommand::Stop(args) => args.verbose,
            HookCommand::SubagentStop(args) => args.verbose,
            HookCommand::SessionStart(args) => args.verbose,
            HookCommand::PreCompact(args) => args.verbose,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for context the host
    // feeds back to the model.
    let filter = if cli.hook.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let hook_name = cli.hook.name();
    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{hook_name} hook error: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };
    let runtime = HookRuntime::new(base_dir, EnvContext::discover());

    let result = match cli.hook {
        HookCommand::PreToolUse(args) => hooks::pre_tool_use::run(&args, &runtime).await,
        HookCommand::PostToolUse(args) => hooks::post_tool_use::run(&args, &runtime).await,
        HookCommand::UserPromptSubmit(args) => {
            hooks::user_prompt_submit::run(&args, &runtime).await
        }
        HookCommand::Notification(args) => hooks::notification::run(&args, &runtime).await,
        HookCommand::Stop(args) => hooks::stop::run(&args, &runtime).await,
        HookCommand::SubagentStop(args) => hooks::subagent_stop::run(&args, &runtime).await,
        HookCommand::SessionStart(args) => hooks::session_start::run(&args, &runtime).await,
        HookCommand::PreCompact(args) => hooks::pre_compact::run(&args, &runtime).await,
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{hook_name} hook error: {e}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
