//! `roadmap` - generate a project roadmap and track it to completion

mod commands;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::Edit;
use roadmap_core::{SubtaskId, TaskId};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn file_arg() -> Arg {
    Arg::new("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Roadmap JSON document")
}

fn task_arg() -> Arg {
    Arg::new("task-id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Task id")
}

fn subtask_arg() -> Arg {
    Arg::new("subtask-id")
        .required(true)
        .help("Subtask id (integer or text)")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .help("Write the result here instead of stdout")
}

fn cli() -> Command {
    Command::new("roadmap")
        .version(roadmap_core::VERSION)
        .about("Generate a project roadmap from a goal and track its progress")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a roadmap for a goal")
                .arg(Arg::new("goal").required(true).help("What you want to achieve"))
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Generator config (TOML)"),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("stats")
                .about("Show progress statistics")
                .arg(file_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("toggle-task")
                .about("Advance a task: Todo -> In Progress -> Done -> Todo")
                .arg(file_arg())
                .arg(task_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("toggle-subtask")
                .about("Check or uncheck a subtask")
                .arg(file_arg())
                .arg(task_arg())
                .arg(subtask_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("add-subtask")
                .about("Append a subtask to a task")
                .arg(file_arg())
                .arg(task_arg())
                .arg(Arg::new("title").required(true).help("Subtask title"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("delete-subtask")
                .about("Remove a subtask")
                .arg(file_arg())
                .arg(task_arg())
                .arg(subtask_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("delete-task")
                .about("Remove a task")
                .arg(file_arg())
                .arg(task_arg())
                .arg(output_arg()),
        )
}

fn task_id(args: &ArgMatches) -> TaskId {
    TaskId(args.get_one::<i64>("task-id").copied().unwrap_or_default())
}

fn subtask_id(args: &ArgMatches) -> SubtaskId {
    SubtaskId::parse_token(
        args.get_one::<String>("subtask-id")
            .map(String::as_str)
            .unwrap_or_default(),
    )
}

fn edit_for(name: &str, args: &ArgMatches) -> anyhow::Result<Edit> {
    let task = task_id(args);
    Ok(match name {
        "toggle-task" => Edit::ToggleTask(task),
        "toggle-subtask" => Edit::ToggleSubtask(task, subtask_id(args)),
        "add-subtask" => Edit::add_subtask(
            task,
            args.get_one::<String>("title")
                .map(String::as_str)
                .unwrap_or_default(),
        )?,
        "delete-subtask" => Edit::DeleteSubtask(task, subtask_id(args)),
        "delete-task" => Edit::DeleteTask(task),
        other => anyhow::bail!("unknown command: {other}"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => {
            let goal = args
                .get_one::<String>("goal")
                .map(String::as_str)
                .unwrap_or_default();
            let output = args.get_one::<PathBuf>("output").map(PathBuf::as_path);
            let config = args.get_one::<PathBuf>("config").map(PathBuf::as_path);
            let created = commands::run_generate(goal, config, output).await?;
            if !created {
                std::process::exit(1);
            }
        }
        Some(("stats", args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing roadmap file");
            };
            let store = commands::load(file)?;
            if args.get_flag("json") {
                println!("{}", commands::stats_json(&store)?);
            } else {
                print!("{}", commands::render_stats(&store));
            }
        }
        Some((name, args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing roadmap file");
            };
            let edit = edit_for(name, args)?;
            let output = args.get_one::<PathBuf>("output").map(PathBuf::as_path);
            commands::edit(file, &edit, output)?;
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn subtask_ids_parse_as_number_or_text() {
        let matches = cli()
            .try_get_matches_from(["roadmap", "toggle-subtask", "plan.json", "3", "12"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(
            edit_for(name, args).unwrap(),
            Edit::ToggleSubtask(TaskId(3), SubtaskId::Number(12))
        );

        let matches = cli()
            .try_get_matches_from(["roadmap", "delete-subtask", "plan.json", "3", "3-sub-0"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(
            edit_for(name, args).unwrap(),
            Edit::DeleteSubtask(TaskId(3), SubtaskId::from("3-sub-0"))
        );
    }

    #[test]
    fn blank_title_is_rejected_before_store() {
        let matches = cli()
            .try_get_matches_from(["roadmap", "add-subtask", "plan.json", "1", " "])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert!(edit_for(name, args).is_err());
    }

    #[test]
    fn task_id_must_be_integer() {
        assert!(cli()
            .try_get_matches_from(["roadmap", "toggle-task", "plan.json", "abc"])
            .is_err());
    }
}
