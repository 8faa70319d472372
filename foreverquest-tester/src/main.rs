mod logic;
mod scenarios;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use foreverquest_game::{BundledConfig, ConfigLoader, QuestConfig};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{FileConfig, LogicTester, ScenarioResult, resolve_seed_inputs};
use scenarios::{expand_scenarios, find_scenario, list_scenarios};

#[derive(Debug, Parser)]
#[command(name = "foreverquest-tester", version = "0.1.0")]
#[command(about = "Automated QA for Foreverquest quest documents and mini-game engines")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated numbers or ranges like 1-20)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Quest document to test instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(&args)?;
    let scenarios = expand_scenarios(&split_csv(&args.scenarios));
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;

    let results = run_logic_scenarios(&args, &config, &scenarios, &seeds);
    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "💞 Foreverquest Automated Tester".bright_magenta().bold());
    println!("{}", "================================".magenta());
}

fn load_config(args: &Args) -> Result<QuestConfig> {
    match &args.config {
        Some(path) => FileConfig::new(path)
            .load_config()
            .with_context(|| format!("failed to load quest from {}", path.display())),
        None => BundledConfig
            .load_config()
            .context("bundled quest document is invalid"),
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn run_logic_scenarios(
    args: &Args,
    config: &QuestConfig,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(config, args.verbose);
    let mut results = Vec::new();
    for key in scenarios {
        if let Some(scenario) = find_scenario(key) {
            results.extend(tester.run_scenario(&scenario, seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", key.yellow());
        }
    }
    results
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                logic::reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Foreverquest Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
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
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            config: None,
            verbose: false,
            output: None,
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "foreverquest-main-{label}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn split_csv_trims_and_drops_empty_items() {
        assert_eq!(
            split_csv(" smoke, ,maze-connectivity ,"),
            vec!["smoke".to_string(), "maze-connectivity".to_string()]
        );
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["foreverquest-tester"]);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.seeds, "1337");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.report, "console");
        assert!(args.config.is_none());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let mut args = base_args();
        args.config = Some(PathBuf::from("/nonexistent/quest_config.json"));
        let err = load_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("quest_config.json"));
        assert!(load_config(&base_args()).is_ok());
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let config = QuestConfig::bundled().unwrap();
        let results = run_logic_scenarios(
            &base_args(),
            &config,
            &["does-not-exist".to_string(), "skip-all".to_string()],
            &[7],
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].passed);
    }

    #[test]
    fn reports_write_to_file() {
        let result = ScenarioResult {
            scenario_name: "Random Play-through".to_string(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            detail: Some("ending ending-cozy".to_string()),
            average_duration: Duration::from_millis(2),
        };
        for report in ["json", "markdown", "console"] {
            let path = temp_file(report);
            let mut args = base_args();
            args.report = report.to_string();
            args.output = Some(path.clone());
            write_reports(&args, std::slice::from_ref(&result), Instant::now()).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("Random Play-through"), "{report}: {content}");
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn empty_results_still_produce_a_report() {
        let path = temp_file("empty");
        let mut args = base_args();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
        let _ = std::fs::remove_file(path);
    }
}
