use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tf", about = concat!("taskflow v", env!("CARGO_PKG_VERSION"), " - quick-add task lists, kept in memory"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read settings from a TOML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Log filter for stderr diagnostics (e.g. "debug", "taskflow=trace")
    #[arg(long, global = true)]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the tasks visible in a view, project or search
    List(ListArgs),
    /// Show what the quick-add parser reads from a line of text
    Parse(ParseArgs),
    /// Add a task using quick-add syntax and show the result
    Add(AddArgs),
    /// Toggle a task's completion and show the result
    Toggle(ToggleArgs),
    /// List projects
    Projects,
    /// Show the user profile
    Profile,
    /// Set daily and weekly goals
    Goals(GoalsArgs),
    /// Show productivity for the current week
    Stats,
    /// Start an interactive session (state lasts until exit)
    Shell,
}

#[derive(Args)]
pub struct ListArgs {
    /// View: inbox, today, upcoming, filters, project (default from config)
    #[arg(long)]
    pub view: Option<String>,
    /// Show one project's tasks
    #[arg(long)]
    pub project: Option<String>,
    /// Search content, descriptions and labels (overrides view and project)
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Quick-add text, e.g. "Call mom !!1 @tomorrow #Personal"
    pub text: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Quick-add text
    pub text: String,
    /// Task description
    #[arg(long, short)]
    pub description: Option<String>,
    /// Project ID (default: first project)
    #[arg(long)]
    pub project: Option<String>,
    /// Add as a sub-task of this task ID
    #[arg(long)]
    pub parent: Option<String>,
    /// Priority code 0-4, written into the text as !!N
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub priority: Option<u8>,
    /// Due date: today, tomorrow or YYYY-MM-DD, written into the text
    #[arg(long)]
    pub date: Option<String>,
    /// Tag to add (repeatable), written into the text as #tag
    #[arg(long)]
    pub tag: Vec<String>,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct GoalsArgs {
    /// Tasks per day (1-20)
    #[arg(long)]
    pub daily: u32,
    /// Tasks per week (5-100, multiple of 5)
    #[arg(long)]
    pub weekly: u32,
}
