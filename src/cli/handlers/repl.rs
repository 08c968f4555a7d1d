use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use log::debug;

use crate::model::options::{DisplayOptions, Selection};
use crate::ops::graph::LinkGraph;
use crate::render::style::{CYAN, GREEN, WHITE, YELLOW};
use crate::render::{Painter, render};

use super::print_rendered;

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Render {
        selection: Selection,
        options: DisplayOptions,
    },
    Help,
    Clear,
    Quit,
}

/// Parse a prompt line. Flags start from `defaults`; unknown words are
/// ignored.
///
/// The first bare number is the position. `-r` marks it as a root
/// selection, or takes the number that follows when no position came first.
pub fn parse_command(input: &str, defaults: &DisplayOptions) -> ReplCommand {
    let input = input.trim();
    match input.to_lowercase().as_str() {
        "quit" | "exit" | "q" => return ReplCommand::Quit,
        "help" | "h" | "?" => return ReplCommand::Help,
        "clear" | "c" => return ReplCommand::Clear,
        _ => {}
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let mut options = defaults.clone();
    let mut position = None;
    let mut root = false;
    let mut i = 0;

    while i < parts.len() {
        let part = parts[i];
        match part {
            _ if position.is_none() && is_number(part) => position = part.parse().ok(),
            "-hn" | "--hide-notes" => options.hide_notes = true,
            "-sd" | "--show-done" => options.show_done = true,
            "-l" | "--link-lock" => options.link_lock = true,
            "-sc" | "--show-context" => options.show_context = true,
            "-r" | "--root" => {
                if position.is_some() {
                    root = true;
                } else if let Some(next) = parts.get(i + 1)
                    && is_number(next)
                {
                    position = next.parse().ok();
                    root = true;
                    i += 1;
                }
            }
            "-t" | "--tag" => {
                let tags: Vec<String> = parts[i + 1..]
                    .iter()
                    .take_while(|p| !p.starts_with('-'))
                    .map(|p| p.to_string())
                    .collect();
                i += tags.len();
                options.tags = tags;
            }
            _ => match (value_slot(&mut options, part), parts.get(i + 1)) {
                (Some(slot), Some(value)) => {
                    *slot = Some(value.to_string());
                    i += 1;
                }
                _ => debug!("ignoring '{}'", part),
            },
        }
        i += 1;
    }

    let selection = match position {
        Some(pos) if root => Selection::Root(pos),
        Some(pos) => Selection::Branch(pos),
        None => Selection::All,
    };
    ReplCommand::Render { selection, options }
}

/// Filter that takes a value: `-a`, `-s`, `-c`
fn value_slot<'o>(options: &'o mut DisplayOptions, flag: &str) -> Option<&'o mut Option<String>> {
    match flag {
        "-a" | "--area" => Some(&mut options.area),
        "-s" | "--status" => Some(&mut options.status),
        "-c" | "--context" => Some(&mut options.context),
        _ => None,
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Read commands until `quit` or end of input.
pub(super) fn run(
    graph: &LinkGraph<'_>,
    defaults: &DisplayOptions,
    painter: Painter,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    clear_screen(&mut stdout)?;

    if graph.tasks().is_empty() {
        println!("{}", painter.color("No tasks found", Some(YELLOW)));
    }

    let mut line = String::new();
    loop {
        print!("\n{}", painter.color("❯ ", Some(GREEN)));
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match parse_command(&line, defaults) {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{}", help_text(painter)),
            ReplCommand::Clear => clear_screen(&mut stdout)?,
            ReplCommand::Render { selection, options } => {
                println!();
                print_rendered(&render(graph, &options, selection, painter));
            }
        }
    }
    Ok(())
}

fn clear_screen(stdout: &mut io::Stdout) -> io::Result<()> {
    if stdout.is_tty() {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Ok(())
}

fn help_text(painter: Painter) -> String {
    let rule = painter.color(&"═".repeat(70), Some(CYAN));
    let heading = |s: &str| painter.color(s, Some(YELLOW));
    let cmd = |s: &str| painter.color(s, Some(GREEN));

    let rows: [(&str, &[(&str, &str)]); 4] = [
        (
            "Basic commands:",
            &[
                ("Enter", "Show all root tasks and relations"),
                ("<number>", "Show task branch from line number: 45"),
                ("help / ?", "Show this help"),
                ("quit / exit / q", "Exit"),
                ("clear / c", "Clear screen"),
            ],
        ),
        (
            "Display flags:",
            &[
                ("-r / --root <n>", "Show full tree from root: -r 45 / 45 -r"),
                ("-hn / --hide-notes", "Hide notes without an id"),
                ("-sd / --show-done", "Show completed tasks"),
                ("-l / --link-lock", "Show only linked tasks"),
                ("-sc / --show-context", "Show note content"),
            ],
        ),
        (
            "Filter flags:",
            &[
                ("-a / --area <n>", "Filter by area: -a work"),
                ("-s / --status <n>", "Filter by status: -s run"),
                ("-t / --tag <n> [<n>]", "Filter by tag(s): -t bug fix"),
                ("-c / --context <n>", "Filter by context: -c home"),
            ],
        ),
        (
            "Combining commands:",
            &[
                ("45 -r -hn -sd", "Line 45, full tree, no notes, show completed"),
                ("-a work -s run", "Filter area=work AND status=run"),
            ],
        ),
    ];

    let mut out = vec![
        rule.clone(),
        format!("  {}", painter.color("Available Commands", Some(WHITE))),
        rule.clone(),
    ];
    for (title, entries) in rows {
        out.push(String::new());
        out.push(format!("  {}", heading(title)));
        for (keys, text) in entries {
            // pad before painting so escape codes don't skew the columns
            out.push(format!("    {} - {}", cmd(&format!("{:<22}", keys)), text));
        }
    }
    out.push(String::new());
    out.push(rule);
    out.join("\n")
}
