mod shell;
pub use shell::run_shell;

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::model::config::AppConfig;
use crate::model::store::Store;
use crate::model::view::ViewKind;
use crate::ops::dashboard::Dashboard;
use crate::ops::{productivity, task_ops};
use crate::parse::quick_add::{self, PriorityCode, QuickToken};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let today = resolve_today(cli.today.as_deref())?;
    let config = config_io::read_config(cli.config.as_deref())?;
    let mut dashboard = build_dashboard(&config, today)?;

    match cli.command {
        None | Some(Commands::Shell) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            run_shell(&mut dashboard, &config, stdin.lock(), stdout.lock())?;
            Ok(())
        }
        Some(Commands::List(args)) => cmd_list(&mut dashboard, args, json),
        Some(Commands::Parse(args)) => cmd_parse(today, args, json),
        Some(Commands::Add(args)) => cmd_add(&mut dashboard, args, json),
        Some(Commands::Toggle(args)) => cmd_toggle(&mut dashboard, args, json),
        Some(Commands::Projects) => cmd_projects(dashboard.store(), json),
        Some(Commands::Profile) => cmd_profile(dashboard.store(), json),
        Some(Commands::Goals(args)) => cmd_goals(dashboard.store_mut(), args, json),
        Some(Commands::Stats) => cmd_stats(&dashboard, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_today(arg: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("invalid --today '{}': {}", s, e).into()),
        None => Ok(Local::now().date_naive()),
    }
}

/// Seed a store, apply config overrides, and wrap it in a dashboard
pub fn build_dashboard(config: &AppConfig, today: NaiveDate) -> Result<Dashboard, Box<dyn std::error::Error>> {
    let mut store = Store::seeded(today, Local::now())?;
    config_io::apply_user_overrides(config, &mut store.user)?;
    Ok(Dashboard::new(store, today, config.ui.default_view))
}

/// Parse a date picker value into a date token
pub(crate) fn parse_date_token(s: &str) -> Result<QuickToken, String> {
    QuickToken::parse_date(s).ok_or_else(|| format!("invalid date '{}' (expected: today, tomorrow, YYYY-MM-DD)", s))
}

pub(crate) fn parse_priority_token(code: u8) -> Result<QuickToken, String> {
    PriorityCode::new(code)
        .map(QuickToken::Priority)
        .ok_or_else(|| format!("invalid priority code {} (expected 0-4)", code))
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_list(dashboard: &mut Dashboard, args: ListArgs, json: bool) -> CmdResult {
    if let Some(view) = &args.view {
        dashboard.select_view(view.parse::<ViewKind>()?);
    }
    if let Some(project) = &args.project {
        dashboard.select_project(project)?;
    }
    if let Some(query) = args.search {
        dashboard.open_search();
        dashboard.set_search_query(query);
    }

    let tasks = dashboard.visible_tasks();
    let empty_state = dashboard.empty_state();
    let title = dashboard.title();
    if json {
        let output = TaskListJson {
            title,
            tasks: tasks.iter().map(|t| task_to_json(t)).collect(),
            empty_state,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_lines(&format_task_list(&title, &tasks, empty_state.as_ref(), dashboard.today()));
    }
    Ok(())
}

fn cmd_parse(today: NaiveDate, args: ParseArgs, json: bool) -> CmdResult {
    let fields = quick_add::derive(&args.text, today);
    if json {
        let output = ParseJson {
            text: &args.text,
            fields: &fields,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_lines(&format_fields(&fields));
    }
    Ok(())
}

fn cmd_add(dashboard: &mut Dashboard, args: AddArgs, json: bool) -> CmdResult {
    if let Some(project) = &args.project {
        dashboard.select_project(project)?;
    }

    let editor = dashboard.open_editor();
    editor.set_text(args.text);
    if let Some(description) = args.description {
        editor.set_description(description);
    }
    if let Some(code) = args.priority {
        editor.apply(&parse_priority_token(code)?);
    }
    if let Some(date) = &args.date {
        editor.apply(&parse_date_token(date)?);
    }
    for tag in &args.tag {
        editor.add_tag(tag);
    }

    let today = dashboard.today();
    let task = match &args.parent {
        Some(parent) => {
            let submission = dashboard
                .editor_mut()
                .and_then(|e| e.submit())
                .ok_or("task text is empty")?;
            dashboard.cancel_editor();
            task_ops::add_subtask(dashboard.store_mut(), parent, submission, Local::now())?
        }
        None => dashboard.submit_editor()?.ok_or("task text is empty")?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        println!("{}", format_task_line(task, today));
    }
    Ok(())
}

fn cmd_toggle(dashboard: &mut Dashboard, args: ToggleArgs, json: bool) -> CmdResult {
    dashboard.toggle_task(&args.id)?;
    let task = dashboard
        .store()
        .find_task(&args.id)
        .ok_or_else(|| task_ops::TaskError::NotFound(args.id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        println!("{}", format_task_line(task, dashboard.today()));
    }
    Ok(())
}

fn cmd_projects(store: &Store, json: bool) -> CmdResult {
    if json {
        let projects: Vec<ProjectJson> = store
            .projects
            .values()
            .map(|p| project_to_json(p, store))
            .collect();
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        print_lines(&format_project_list(store));
    }
    Ok(())
}

fn cmd_profile(store: &Store, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&store.user)?);
    } else {
        print_lines(&format_profile(&store.user));
    }
    Ok(())
}

fn cmd_goals(store: &mut Store, args: GoalsArgs, json: bool) -> CmdResult {
    store.user.set_goals(args.daily, args.weekly)?;
    tracing::debug!(daily = args.daily, weekly = args.weekly, "goals updated");
    cmd_profile(store, json)
}

fn cmd_stats(dashboard: &Dashboard, json: bool) -> CmdResult {
    let summary = productivity::summary(dashboard.store(), dashboard.today());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_lines(&format_stats(&summary));
    }
    Ok(())
}
