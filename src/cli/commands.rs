//! Command dispatch: load snapshot, build the chart, drive navigation, print.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{department_lines, label, render_view, TreeNodeConvert};
use crate::config::{global_config_path, Settings};
use crate::domain::{ExpansionToggles, FlatIndex, NavigationController, OrgChart, PersonId};
use crate::snapshot::RecordSnapshot;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Config { command } => {
            let settings = Settings::load(cli.config.as_deref())?;
            cmd_config(command, &settings)
        }
        command => {
            let settings = Settings::load(cli.config.as_deref())?;
            let snapshot = load_snapshot(cli, &settings)?;
            let chart = snapshot.build(&settings.build_options());
            let mut nav = NavigationController::new(settings.search_options());
            match command {
                Commands::Tree { from } => cmd_tree(&chart, *from),
                Commands::Departments => cmd_departments(&chart),
                Commands::Search { query } => cmd_search(&chart, &mut nav, query),
                Commands::Open { head_id } => cmd_open(&chart, &mut nav, *head_id),
                Commands::Config { .. } | Commands::Completion { .. } => Ok(()),
            }
        }
    }
}

/// Explicit files win over `--data-dir`, which wins over the configured data dir.
fn load_snapshot(cli: &Cli, settings: &Settings) -> CliResult<RecordSnapshot> {
    if let Some(path) = &cli.snapshot {
        return Ok(RecordSnapshot::load_combined(path)?);
    }
    if let (Some(employees), Some(employers)) = (&cli.employees, &cli.employers) {
        return Ok(RecordSnapshot::load(employees, employers)?);
    }
    let dir = cli
        .data_dir
        .clone()
        .or_else(|| settings.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    debug!(dir = %dir.display(), "loading snapshot from directory");
    Ok(RecordSnapshot::load_dir(&dir)?)
}

#[instrument(level = "debug", skip(chart))]
fn cmd_tree(chart: &OrgChart, from: Option<PersonId>) -> CliResult<()> {
    let index = chart.index();
    let start = match from {
        Some(id) => index
            .get(id)
            .ok_or_else(|| CliError::InvalidArgs(format!("unknown person id: {id}")))?,
        None => chart.root(),
    };
    output::info(&start.to_tree_string());
    Ok(())
}

fn cmd_departments(chart: &OrgChart) -> CliResult<()> {
    if chart.departments().is_empty() {
        output::warning("no departments declared");
        return Ok(());
    }
    output::header("Departments");
    for line in department_lines(chart.departments()) {
        output::detail(&line);
    }
    Ok(())
}

#[instrument(level = "debug", skip(chart, nav))]
fn cmd_search(chart: &OrgChart, nav: &mut NavigationController, query: &str) -> CliResult<()> {
    let index = chart.index();
    let Some(matched) = nav.handle_search(query, &index, chart.departments()) else {
        output::warning(&format!("no match for '{query}'"));
        return Ok(());
    };

    if let Some(node) = index.get(matched) {
        output::action("Match", &label(node));
    }
    print_view(&index, nav)
}

#[instrument(level = "debug", skip(chart, nav))]
fn cmd_open(chart: &OrgChart, nav: &mut NavigationController, head_id: PersonId) -> CliResult<()> {
    let index = chart.index();
    if !nav.open_department(head_id, &index) {
        return Err(CliError::InvalidArgs(format!("unknown person id: {head_id}")));
    }
    print_view(&index, nav)
}

fn print_view(index: &FlatIndex<'_>, nav: &NavigationController) -> CliResult<()> {
    let state = nav.state();
    let view_root = state
        .current_root_node(index)
        .unwrap_or_else(|| index.root());
    output::header(&label(view_root));
    output::info(&render_view(view_root, state, &ExpansionToggles::new()));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
