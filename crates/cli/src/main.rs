// arkgen - generate ARK: Survival Ascended server config files

mod exit_codes;
mod logging;
mod set_arg;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use ark_settings_config::GeneratorSettings;
use ark_settings_engine::calc::DerivedStats;
use ark_settings_engine::view::ViewRow;
use ark_settings_engine::{events, species, Mode, Section, SettingsCatalog, SettingsError, SettingsSession};
use ark_settings_io::{read_config, write_config, ExportIoError, IniError};

use exit_codes::{
    settings_exit_code, EXIT_ERROR, EXIT_IO, EXIT_PARSE, EXIT_SETTING_UNKNOWN, EXIT_SUCCESS,
    EXIT_USAGE,
};
use set_arg::{SetArg, Unresolved};

#[derive(Parser)]
#[command(name = "arkgen")]
#[command(about = "Generate GameUserSettings.ini and Game.ini for an ARK: Survival Ascended server")]
#[command(version)]
#[command(long_version = long_version())]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Preferences file (default: <config dir>/ark-settings/settings.json)
    #[arg(long, global = true, env = "ARKGEN_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the settings visible in a mode
    #[command(after_help = "\
Examples:
  arkgen catalog
  arkgen catalog --mode advanced --section game
  arkgen catalog --json | jq '.[] | select(.modified)'")]
    Catalog {
        /// basic or advanced (default from preferences)
        #[arg(long)]
        mode: Option<Mode>,

        /// Only one section
        #[arg(long)]
        section: Option<SectionArg>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write GameUserSettings.ini and Game.ini
    #[command(after_help = "\
Examples:
  arkgen generate --out ./ini
  arkgen generate --mode advanced --set XPMultiplier=3 --set game:MaxTamedDinos=3000
  arkgen generate --from ./ini --mod 928595 --mod 731604 --out ./ini")]
    Generate {
        /// basic or advanced (default from preferences)
        #[arg(long)]
        mode: Option<Mode>,

        /// Load existing files from this directory first
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// KEY=VALUE or SECTION:KEY=VALUE (section: server, game). Repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        sets: Vec<SetArg>,

        /// Append a mod id to ActiveMods. Repeatable; order is load order.
        #[arg(long = "mod", value_name = "ID")]
        mods: Vec<String>,

        /// Output directory (default from preferences, else current directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Show derived taming and breeding times
    #[command(after_help = "\
Examples:
  arkgen calc --species Rex
  arkgen calc --set TamingSpeedMultiplier=5 --set BabyMatureSpeedMultiplier=20
  arkgen calc --from ./ini --json")]
    Calc {
        /// Species name (default from preferences)
        #[arg(long)]
        species: Option<String>,

        /// Load existing files from this directory first
        #[arg(long, value_name = "DIR")]
        from: Option<PathBuf>,

        /// KEY=VALUE or SECTION:KEY=VALUE. Repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        sets: Vec<SetArg>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List species known to the calculator
    Species {
        #[arg(long)]
        json: bool,
    },

    /// List events accepted by ActiveEvent
    Events {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SectionArg {
    Server,
    Game,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Server => Section::ServerSettings,
            SectionArg::Game => Section::GameMode,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("ARKGEN_COMMIT"), ")",
        "\ncatalog: ARK: Survival Ascended dedicated server",
        "\ntarget:  ", env!("ARKGEN_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = load_settings(cli.config.as_deref()).and_then(|settings| match cli.command {
        Commands::Catalog { mode, section, json } => cmd_catalog(&settings, mode, section, json),
        Commands::Generate { mode, from, sets, mods, out } => {
            cmd_generate(&settings, mode, from, sets, mods, out)
        }
        Commands::Calc { species, from, sets, json } => cmd_calc(&settings, species, from, sets, json),
        Commands::Species { json } => cmd_species(json),
        Commands::Events { json } => cmd_events(json),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Engine error with its registry exit code.
    pub fn settings(err: SettingsError) -> Self {
        let hint = match &err {
            SettingsError::NotFound { .. } => Some("run `arkgen catalog --mode advanced` to list keys".to_string()),
            SettingsError::UnknownSpecies(_) => Some("run `arkgen species` to list species".to_string()),
            SettingsError::UnknownEvent(_) => Some("run `arkgen events` to list events".to_string()),
            SettingsError::InvalidModId(_) => Some("mod ids are the numeric CurseForge project ids".to_string()),
            _ => None,
        };
        Self { code: settings_exit_code(&err), message: err.to_string(), hint }
    }

    pub fn ini(err: IniError) -> Self {
        match err {
            IniError::Io(e) => Self::io(e.to_string()),
            other => Self::parse(other.to_string()),
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::settings(err)
    }
}

impl From<ExportIoError> for CliError {
    fn from(err: ExportIoError) -> Self {
        Self::io(err.to_string())
    }
}

fn stdout_err(e: io::Error) -> CliError {
    CliError { code: EXIT_ERROR, message: e.to_string(), hint: None }
}

// ============================================================================
// Shared setup
// ============================================================================

fn load_settings(path: Option<&Path>) -> Result<GeneratorSettings, CliError> {
    match path {
        Some(path) => GeneratorSettings::load_from(path).map_err(CliError::parse),
        None => Ok(GeneratorSettings::load()),
    }
}

fn new_session(mode: Mode) -> Result<SettingsSession, CliError> {
    let catalog = Arc::new(SettingsCatalog::builtin()?);
    let mut session = SettingsSession::new(catalog)?;
    session.set_mode(mode);
    Ok(session)
}

/// Import `--from`, then apply `--set` edits in order.
fn prepare(session: &mut SettingsSession, from: Option<&Path>, sets: &[SetArg]) -> Result<(), CliError> {
    if let Some(dir) = from {
        let sections = read_config(dir).map_err(CliError::ini)?;
        let report = session.import(&sections)?;
        log::info!("loaded {} values and {} mods from {}", report.applied, report.mods, dir.display());
    }

    for set in sets {
        let section = set.resolve(session.catalog()).map_err(|e| match e {
            Unresolved::Ambiguous => CliError::args(format!(
                "'{}' is declared in both sections",
                set.key
            ))
            .with_hint(format!("qualify it: --set server:{0}=... or --set game:{0}=...", set.key)),
            Unresolved::Unknown(_) => CliError {
                code: EXIT_SETTING_UNKNOWN,
                message: format!("unknown setting '{}'", set.key),
                hint: Some("run `arkgen catalog --mode advanced` to list keys".to_string()),
            },
        })?;
        session.on_edit(section, &set.key, &set.value)?;
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string(), hint: None })?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// catalog
// ============================================================================

fn cmd_catalog(
    settings: &GeneratorSettings,
    mode: Option<Mode>,
    section: Option<SectionArg>,
    json: bool,
) -> Result<(), CliError> {
    let session = new_session(mode.unwrap_or(settings.default_mode))?;
    let view = session.render_catalog();
    let sections: Vec<Section> = match section {
        Some(s) => vec![s.into()],
        None => Section::ALL.to_vec(),
    };

    if json {
        let rows: Vec<ViewRow<'_>> = sections.iter().flat_map(|&s| view.rows(s)).collect();
        return print_json(&rows);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, &s) in sections.iter().enumerate() {
        if i > 0 {
            writeln!(out).map_err(stdout_err)?;
        }
        writeln!(out, "[{}]  -> {}", s.header(), s.file_name()).map_err(stdout_err)?;
        for row in view.rows(s) {
            writeln!(
                out,
                "  {:<44} {:<6} {:<14} {}",
                row.definition.key,
                row.definition.value_type.to_string(),
                row.value.to_string(),
                row.definition.description
            )
            .map_err(stdout_err)?;
        }
    }
    Ok(())
}

// ============================================================================
// generate
// ============================================================================

fn cmd_generate(
    settings: &GeneratorSettings,
    mode: Option<Mode>,
    from: Option<PathBuf>,
    sets: Vec<SetArg>,
    mods: Vec<String>,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut session = new_session(mode.unwrap_or(settings.default_mode))?;
    prepare(&mut session, from.as_deref(), &sets)?;
    for id in &mods {
        session.mods_mut().add(id)?;
    }

    let exported = session.on_generate();
    let dir = out.unwrap_or_else(|| settings.output_dir());
    let paths = write_config(&dir, &exported)?;

    for path in paths {
        println!("{}", path.display());
    }
    Ok(())
}

// ============================================================================
// calc
// ============================================================================

#[derive(Serialize)]
struct CalcOutput<'a> {
    #[serde(flatten)]
    stats: &'a DerivedStats,
    capped_imprint_percent: f64,
}

fn cmd_calc(
    settings: &GeneratorSettings,
    species: Option<String>,
    from: Option<PathBuf>,
    sets: Vec<SetArg>,
    json: bool,
) -> Result<(), CliError> {
    let mut session = new_session(settings.default_mode)?;
    session.select_species(species.as_deref().unwrap_or(&settings.species))?;
    prepare(&mut session, from.as_deref(), &sets)?;
    let stats = session.derived()?;

    if json {
        return print_json(&CalcOutput {
            stats: &stats,
            capped_imprint_percent: stats.capped_imprint_percent(),
        });
    }

    let imprint_note = if stats.imprint_exceeds_cap() { " (game caps at 100.0%)" } else { "" };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let lines = [
        ("Species", stats.species.clone()),
        ("Taming", format!("{:.1} minutes", stats.taming_time)),
        ("Maturation", format!("{:.1} hours", stats.maturation_time)),
        ("Imprint interval", format!("{:.1} hrs", stats.imprint_interval)),
        ("Max imprint", format!("{:.1}%{}", stats.max_imprint_percent, imprint_note)),
        ("Incubation", format!("{:.1} minutes", stats.incubation_time)),
        ("Mating cooldown", format!("{:.1} hours", stats.mating_cooldown)),
        ("Max wild level", format!("{:.0}", stats.max_wild_level)),
        ("Difficulty", format!("{:.2}", stats.effective_difficulty)),
    ];
    for (label, value) in lines {
        writeln!(out, "{:<18}{}", format!("{label}:"), value).map_err(stdout_err)?;
    }
    Ok(())
}

// ============================================================================
// species / events
// ============================================================================

fn cmd_species(json: bool) -> Result<(), CliError> {
    if json {
        return print_json(species::SPECIES);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{:<12} {:>10} {:>12} {:>10} {:>12} {:>10}",
        "name", "taming(m)", "maturation(h)", "imprint(h)", "incubation(m)", "mating(h)"
    )
    .map_err(stdout_err)?;
    for p in species::SPECIES {
        writeln!(
            out,
            "{:<12} {:>10.1} {:>13.1} {:>10.1} {:>13.1} {:>10.1}",
            p.name,
            p.base_taming_minutes,
            p.base_maturation_hours,
            p.imprint_interval_hours,
            p.incubation_minutes,
            p.mating_cooldown_hours
        )
        .map_err(stdout_err)?;
    }
    Ok(())
}

fn cmd_events(json: bool) -> Result<(), CliError> {
    let sorted = events::sorted();
    if json {
        return print_json(&sorted);
    }
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in sorted {
        writeln!(out, "{:<32} {}", event.label(), event.description).map_err(stdout_err)?;
    }
    Ok(())
}
