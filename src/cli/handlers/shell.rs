use std::io::{self, BufRead, Write};

use crate::cli::output::{format_fields, format_stats, format_task_line, format_task_list};
use crate::model::config::AppConfig;
use crate::model::view::ViewKind;
use crate::ops::dashboard::Dashboard;
use crate::ops::productivity;
use crate::parse::QuickAddEditor;

use super::{parse_date_token, parse_priority_token};

const HELP: &str = "\
commands:
  view <inbox|today|upcoming|filters|project>   switch view
  project <id>                                  show one project
  search [query]                                open search (and set the query)
  close                                         close search
  list                                          show the current list
  toggle <id>                                   complete or reopen a task
  new                                           start a quick-add task
  text <text>                                   set the task text
  desc <text>                                   set the description
  priority <0-4>                                write !!N into the text
  date <today|tomorrow|YYYY-MM-DD>              write @date into the text
  tag <name>                                    write #name into the text
  tags                                          show suggested tags
  submit                                        create the task
  cancel                                        discard the task
  stats                                         productivity this week
  help                                          this text
  quit                                          leave (nothing is saved)";

/// Run a line-oriented session against `dashboard` until `quit` or end of input.
///
/// Command errors are reported on `output` and the session continues.
pub fn run_shell<R: BufRead, W: Write>(
    dashboard: &mut Dashboard,
    config: &AppConfig,
    input: R,
    mut output: W,
) -> io::Result<()> {
    writeln!(output, "taskflow shell, type `help` for commands")?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        if matches!(cmd, "quit" | "exit") {
            break;
        }
        match run_command(dashboard, config, cmd, rest) {
            Ok(lines) => {
                for l in lines {
                    writeln!(output, "{}", l)?;
                }
            }
            Err(e) => writeln!(output, "error: {}", e)?,
        }
    }
    Ok(())
}

fn run_command(
    dashboard: &mut Dashboard,
    config: &AppConfig,
    cmd: &str,
    rest: &str,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    match cmd {
        "help" => Ok(HELP.lines().map(String::from).collect()),
        "view" => {
            dashboard.select_view(rest.parse::<ViewKind>()?);
            Ok(list_lines(dashboard))
        }
        "project" => {
            dashboard.select_project(rest)?;
            Ok(list_lines(dashboard))
        }
        "search" => {
            dashboard.open_search();
            dashboard.set_search_query(rest);
            Ok(list_lines(dashboard))
        }
        "close" => {
            dashboard.close_search();
            Ok(list_lines(dashboard))
        }
        "list" => Ok(list_lines(dashboard)),
        "toggle" => {
            dashboard.toggle_task(rest)?;
            let today = dashboard.today();
            Ok(dashboard
                .store()
                .find_task(rest)
                .map(|t| vec![format_task_line(t, today)])
                .unwrap_or_default())
        }
        "new" => {
            dashboard.open_editor();
            Ok(editor_lines(dashboard))
        }
        "text" => {
            require_editor(dashboard)?.set_text(rest);
            Ok(editor_lines(dashboard))
        }
        "desc" => {
            require_editor(dashboard)?.set_description(rest);
            Ok(editor_lines(dashboard))
        }
        "priority" => {
            let code: u8 = rest
                .parse()
                .map_err(|_| format!("invalid priority code '{}' (expected 0-4)", rest))?;
            let token = parse_priority_token(code)?;
            require_editor(dashboard)?.apply(&token);
            Ok(editor_lines(dashboard))
        }
        "date" => {
            let token = parse_date_token(rest)?;
            require_editor(dashboard)?.apply(&token);
            Ok(editor_lines(dashboard))
        }
        "tag" => {
            require_editor(dashboard)?.add_tag(rest);
            Ok(editor_lines(dashboard))
        }
        "tags" => Ok(vec![config.quick_add.suggested_tags.join(" ")]),
        "submit" => {
            if dashboard.editor().is_none() {
                return Err(NO_EDITOR.into());
            }
            let today = dashboard.today();
            match dashboard.submit_editor()? {
                Some(task) => Ok(vec![format!("added {}", format_task_line(task, today))]),
                None => Ok(vec!["nothing to add: task text is empty".to_string()]),
            }
        }
        "cancel" => {
            dashboard.cancel_editor();
            Ok(Vec::new())
        }
        "stats" => Ok(format_stats(&productivity::summary(dashboard.store(), dashboard.today()))),
        other => Err(format!("unknown command '{}' (try `help`)", other).into()),
    }
}

const NO_EDITOR: &str = "no task being edited (start one with `new`)";

fn require_editor(dashboard: &mut Dashboard) -> Result<&mut QuickAddEditor, &'static str> {
    dashboard.editor_mut().ok_or(NO_EDITOR)
}

fn list_lines(dashboard: &Dashboard) -> Vec<String> {
    let tasks = dashboard.visible_tasks();
    let empty = dashboard.empty_state();
    format_task_list(&dashboard.title(), &tasks, empty.as_ref(), dashboard.today())
}

fn editor_lines(dashboard: &Dashboard) -> Vec<String> {
    let Some(editor) = dashboard.editor() else {
        return Vec::new();
    };
    let mut lines = vec![format!("> {}", editor.text())];
    if !editor.description().is_empty() {
        lines.push(format!("  {}", editor.description()));
    }
    lines.extend(format_fields(editor.fields()).into_iter().map(|l| format!("  {}", l)));
    lines
}
