mod common;
mod logic;

use anyhow::{Context, Result, bail};
use chargen_game::{GenerationParams, Registry, RuleSystem, validate_tables};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::split_csv;
use logic::{SweepResult, SweepTester, fresh_seeds, resolve_seed_inputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Print each generated document as JSON
    Generate,
    /// Replay every seed and check document invariants
    Sweep,
}

#[derive(Debug, Parser)]
#[command(name = "chargen-tester", version = "0.1.0")]
#[command(about = "Seeded character generation and determinism sweeps for chargen rule systems")]
struct Args {
    /// Run mode: generate documents or sweep for invariant violations
    #[arg(long, value_enum, default_value_t = RunMode::Generate)]
    mode: RunMode,

    /// Rule systems to run (comma-separated)
    #[arg(long, default_value = "cod")]
    rules: String,

    /// List all available rule systems and exit
    #[arg(long)]
    list_rules: bool,

    /// Seeds to run (comma-separated); `random` draws a fresh seed
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Extra fresh seeds per rule system (sweep mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format (sweep mode only)
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file with generation parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Gnosis for Awakening characters (overrides --params)
    #[arg(long)]
    gnosis: Option<u8>,

    /// Blood Potency for Requiem characters (overrides --params)
    #[arg(long)]
    blood_potency: Option<u8>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    validate_tables().context("built-in rule tables are malformed")?;
    let registry = Registry::builtin();

    if maybe_list_rules(&args, registry)? {
        return Ok(());
    }

    let systems = resolve_rules(registry, &args.rules)?;
    let params = load_params(&args)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;

    match args.mode {
        RunMode::Generate => write_documents(&args, &systems, &seeds, params),
        RunMode::Sweep => {
            announce_banner();
            let start_time = Instant::now();
            let tester = SweepTester::new(params, args.verbose);
            let results: Vec<SweepResult> = systems
                .iter()
                .map(|system| {
                    let mut sweep_seeds = seeds.clone();
                    sweep_seeds.extend(fresh_seeds(args.iterations));
                    tester.run_rules(system, &sweep_seeds)
                })
                .collect();
            write_reports(&args, &results, start_time)?;
            if results.iter().any(|r| !r.passed) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn maybe_list_rules(args: &Args, registry: &Registry) -> Result<bool> {
    if !args.list_rules {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available rule systems:")?;
    for system in registry.systems() {
        writeln!(output_target.writer(), "  {:8} - {}", system.id(), system.label())?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Chargen Sweep Tester".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn resolve_rules<'a>(registry: &'a Registry, rules_arg: &str) -> Result<Vec<&'a RuleSystem>> {
    let mut ids = split_csv(rules_arg);
    if ids.iter().any(|id| id == "all") {
        ids = registry.ids().into_iter().map(str::to_string).collect();
    }
    if ids.is_empty() {
        bail!("no rule systems requested");
    }

    let mut systems = Vec::with_capacity(ids.len());
    for id in &ids {
        match registry.resolve(id) {
            Ok(system) => systems.push(system),
            Err(err) if err.is_not_found() => bail!(
                "Unknown rule system: {id} (available: {})",
                registry.ids().join(", ")
            ),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(systems)
}

fn load_params(args: &Args) -> Result<GenerationParams> {
    let mut params = match &args.params {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GenerationParams::from_json(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => GenerationParams::default(),
    };
    if let Some(gnosis) = args.gnosis {
        params = params.with_gnosis(gnosis);
    }
    if let Some(blood_potency) = args.blood_potency {
        params = params.with_blood_potency(blood_potency);
    }
    Ok(params)
}

fn write_documents(
    args: &Args,
    systems: &[&RuleSystem],
    seeds: &[chargen_game::Seed],
    params: GenerationParams,
) -> Result<()> {
    let mut documents = Vec::with_capacity(systems.len() * seeds.len());
    for system in systems {
        for seed in seeds {
            let doc = system
                .generate(seed.clone(), params)
                .with_context(|| format!("{} failed for seed {seed}", system.id()))?;
            if args.verbose {
                eprintln!(
                    "{} {} / {} → {:016x}",
                    "✔".green(),
                    system.id(),
                    seed,
                    doc.fingerprint()
                );
            }
            documents.push(doc);
        }
    }

    let mut output_target = OutputTarget::new(args.output.clone())?;
    if let [doc] = documents.as_slice() {
        serde_json::to_writer_pretty(&mut output_target, doc)?;
    } else {
        serde_json::to_writer_pretty(&mut output_target, &documents)?;
    }
    writeln!(&mut output_target)?;
    output_target.flush_inner()?;
    Ok(())
}

fn write_reports(args: &Args, results: &[SweepResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            let duration = start_time.elapsed();
            logic::reports::generate_console_report(&mut output_target, results, duration)?;
        }
    }

    if args.report == "console" {
        let duration = start_time.elapsed();
        writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: RunMode::Generate,
            rules: "cod".to_string(),
            list_rules: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            verbose: false,
            output: None,
            params: None,
            gnosis: None,
            blood_potency: None,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "chargen-main-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn resolve_rules_expands_all_and_rejects_unknown() {
        let registry = Registry::builtin();
        let all = resolve_rules(registry, "all").unwrap();
        assert_eq!(all.len(), registry.ids().len());

        let err = resolve_rules(registry, "cod,xyz").unwrap_err();
        assert!(err.to_string().contains("Unknown rule system: xyz"));
        assert!(resolve_rules(registry, " , ").is_err());
    }

    #[test]
    fn flags_override_params_file() {
        let path = temp_path("params");
        std::fs::write(&path, r#"{"gnosis": 4, "blood_potency": 2}"#).unwrap();
        let mut args = base_args();
        args.params = Some(path);
        args.gnosis = Some(6);
        let params = load_params(&args).unwrap();
        assert_eq!(params.gnosis, 6);
        assert_eq!(params.blood_potency, 2);
    }

    #[test]
    fn missing_params_file_is_reported() {
        let mut args = base_args();
        args.params = Some(temp_path("missing"));
        let err = load_params(&args).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn write_documents_emits_single_object_for_one_pair() {
        let path = temp_path("doc");
        let mut args = base_args();
        args.output = Some(path.clone());
        let registry = Registry::builtin();
        let systems = resolve_rules(registry, "vtr2").unwrap();
        let seeds = resolve_seed_inputs(&split_csv("abc")).unwrap();
        write_documents(&args, &systems, &seeds, GenerationParams::default()).unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["metadata"]["rules"], "vtr2");
        assert_eq!(value["metadata"]["seed"], "abc");
    }

    #[test]
    fn write_reports_honors_markdown() {
        let path = temp_path("report");
        let mut args = base_args();
        args.report = "markdown".to_string();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("# Chargen Sweep Results"));
    }
}
