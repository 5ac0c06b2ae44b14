//! `gradebook` - CLI for recording student grades
//!
//! This binary opens the student data file, runs one form action (or the
//! interactive form) and exits non-zero when the action was refused or could
//! not be saved.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use gradebook::cli::{
    run_shell, AddCommand, Cli, Command, ConfigCommand, ConsoleSurface, DeleteCommand, ShowCommand,
};
use gradebook::{init_logging, Completion, Config, Form, JsonFile};

type ConsoleForm<R, W> = Form<JsonFile, ConsoleSurface<R, W>>;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, then apply the command-line data file override
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(data_file) = cli.data_file.clone() {
        config.storage.data_file = data_file;
    }

    match cli.command {
        Command::Shell => handle_shell(&config),
        Command::Add(add_cmd) => Ok(exit_code(handle_add(&config, &add_cmd))),
        Command::Show(show_cmd) => Ok(exit_code(handle_show(&config, &show_cmd))),
        Command::Delete(delete_cmd) => Ok(exit_code(handle_delete(&config, &delete_cmd))),
        Command::Courses => {
            handle_courses(&config);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_form<R: BufRead, W: Write>(
    config: &Config,
    surface: ConsoleSurface<R, W>,
) -> ConsoleForm<R, W> {
    let file =
        JsonFile::new(config.data_file()).with_atomic_writes(config.storage.atomic_writes);
    Form::open(file, surface, config.catalog())
}

fn console() -> ConsoleSurface<io::StdinLock<'static>, io::Stdout> {
    ConsoleSurface::new(io::stdin().lock(), io::stdout())
}

fn exit_code(completion: Completion) -> ExitCode {
    if completion.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn handle_shell(config: &Config) -> anyhow::Result<ExitCode> {
    let mut form = open_form(config, console().with_row_numbers(true));
    run_shell(&mut form)?;
    Ok(ExitCode::SUCCESS)
}

fn handle_add(config: &Config, cmd: &AddCommand) -> Completion {
    let mut form = open_form(config, console());
    let course = form
        .catalog()
        .resolve(&cmd.course)
        .map_or_else(|_| cmd.course.clone(), str::to_string);
    form.set_inputs(&cmd.name, Some(&course), &cmd.score);
    form.submit_grade()
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> Completion {
    let mut form = open_form(config, console().with_format(cmd.format));
    form.refresh_display()
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> Completion {
    let mut form = open_form(config, console().assume_yes(cmd.yes));
    form.delete_student(Some(&cmd.name))
}

fn handle_courses(config: &Config) {
    for (i, course) in config.catalog().names().iter().enumerate() {
        println!("{:>2}. {course}", i + 1);
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data file:          {}", config.data_file().display());
                println!("  Atomic writes:      {}", config.storage.atomic_writes);
                println!();
                println!("[Courses]");
                for name in &config.courses.names {
                    println!("  {name}");
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
