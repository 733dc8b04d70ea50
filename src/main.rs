use clap::Parser;
use schedsim::config::WorkloadConfig;
use schedsim::{render_gantt, Config, PolicyRun, SimulationReport, Simulator};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "cli")]
use colored::Colorize;
#[cfg(feature = "cli")]
use tabled::{settings::Style, Table, Tabled};

#[derive(Parser, Debug)]
#[command(author, version, about = "CPU Scheduling Simulator", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Policies to run: all, or a comma list of fifo, sjf, stcf, rr, mlfq
    #[arg(short, long)]
    policy: Option<String>,

    /// Round-robin time quantum
    #[arg(long)]
    time_quantum: Option<u64>,

    /// MLFQ quantum for the top queue
    #[arg(long)]
    q1: Option<u64>,

    /// MLFQ quantum for the middle queue
    #[arg(long)]
    q2: Option<u64>,

    /// Generate N random processes instead of reading them from the config
    #[arg(short, long, value_name = "N")]
    random: Option<usize>,

    /// Seed for random process generation
    #[arg(long)]
    seed: Option<u64>,

    /// Minimal output (summary line per policy)
    #[arg(short, long)]
    quiet: bool,

    /// Report each policy as it finishes
    #[arg(short, long)]
    verbose: bool,

    /// Very verbose debug output
    #[arg(long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Save timelines and metrics to a JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write PNG Gantt charts into this directory
    #[arg(long)]
    plot_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Args {
    fn verbosity_level(&self) -> VerbosityLevel {
        if self.debug {
            VerbosityLevel::Debug
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else if self.quiet {
            VerbosityLevel::Quiet
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Load the config file and apply command-line overrides
    fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = if self.random.is_some() && !self.config.exists() {
            Config::default()
        } else {
            Config::from_file(&self.config)?
        };

        if let Some(policy) = &self.policy {
            config.scheduler.policy = policy.clone();
        }
        if let Some(q) = self.time_quantum {
            config.scheduler.time_quantum = q;
        }
        if let Some(q) = self.q1 {
            config.scheduler.q1_quantum = q;
        }
        if let Some(q) = self.q2 {
            config.scheduler.q2_quantum = q;
        }

        if let Some(n) = self.random {
            config.processes.clear();
            config.workload = Some(WorkloadConfig::with_count(n, self.seed.unwrap_or(0)));
        } else if let (Some(seed), Some(workload)) = (self.seed, config.workload.as_mut()) {
            workload.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn default_log_filter(verbosity: VerbosityLevel) -> &'static str {
    match verbosity {
        VerbosityLevel::Quiet => "error",
        VerbosityLevel::Normal => "warn",
        VerbosityLevel::Verbose => "info",
        VerbosityLevel::Debug => "debug",
    }
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct ProcessRow {
    #[tabled(rename = "Process")]
    id: String,
    #[tabled(rename = "Arrival")]
    arrival: u64,
    #[tabled(rename = "Burst")]
    burst: u64,
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct IntervalRow {
    #[tabled(rename = "Process")]
    id: String,
    #[tabled(rename = "Start")]
    start: u64,
    #[tabled(rename = "End")]
    end: u64,
    #[tabled(rename = "Duration")]
    duration: u64,
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct ProcessMetricsRow {
    #[tabled(rename = "Process")]
    id: String,
    #[tabled(rename = "Completion")]
    completion: u64,
    #[tabled(rename = "Turnaround")]
    turnaround: u64,
    #[tabled(rename = "Waiting")]
    waiting: u64,
    #[tabled(rename = "Response")]
    response: u64,
    #[tabled(rename = "Preemptions")]
    preemptions: usize,
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Policy")]
    policy: String,
    #[tabled(rename = "Makespan")]
    makespan: u64,
    #[tabled(rename = "Avg Turnaround")]
    turnaround: String,
    #[tabled(rename = "Avg Waiting")]
    waiting: String,
    #[tabled(rename = "Avg Response")]
    response: String,
    #[tabled(rename = "Switches")]
    switches: usize,
}

fn main() {
    let args = Args::parse();
    let verbosity = args.verbosity_level();
    let use_color = !args.no_color;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(verbosity)),
    )
    .init();

    if verbosity >= VerbosityLevel::Normal {
        print_heading("CPU Scheduling Simulator", use_color);
        if args.random.is_none() {
            println!("Loading configuration from: {:?}\n", args.config);
        }
    }

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    if verbosity >= VerbosityLevel::Normal {
        print_heading("Configuration:", use_color);
        println!("  Policies: {}", config.scheduler.policy);
        println!("  RR time quantum: {}", config.scheduler.time_quantum);
        println!(
            "  MLFQ quanta: {} / {} / run to completion",
            config.scheduler.q1_quantum, config.scheduler.q2_quantum
        );
        match &config.workload {
            Some(workload) => println!(
                "  Workload: {} random processes ({} arrivals, seed {})",
                workload.num_processes, workload.arrival_pattern, workload.seed
            ),
            None => println!("  Workload: {} configured processes", config.processes.len()),
        }
        println!();
    }

    let simulator = match Simulator::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error creating simulator: {}", e);
            std::process::exit(1);
        }
    };

    if verbosity >= VerbosityLevel::Normal {
        print_processes(&simulator, use_color);
    }

    let start_time = Instant::now();
    let result = if verbosity >= VerbosityLevel::Verbose {
        simulator.run_with_callback(|run| print_run(run, use_color))
    } else {
        simulator.run_all()
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let elapsed = start_time.elapsed();

    match verbosity {
        VerbosityLevel::Quiet => print_quiet(&report),
        VerbosityLevel::Normal => report.runs.iter().for_each(|run| print_run(run, use_color)),
        // already printed as each policy finished
        VerbosityLevel::Verbose | VerbosityLevel::Debug => {}
    }

    if report.runs.len() > 1 && verbosity >= VerbosityLevel::Normal {
        print_comparison(&report, use_color);
    }

    if verbosity >= VerbosityLevel::Normal {
        println!(
            "\nSimulated {} policies in {:.2}ms (real time)",
            report.runs.len(),
            elapsed.as_secs_f64() * 1000.0
        );
    }

    if let Some(output_path) = &args.output {
        match save_report_json(&report, output_path) {
            Ok(_) => {
                if verbosity >= VerbosityLevel::Normal {
                    println!("\nResults saved to: {:?}", output_path);
                }
            }
            Err(e) => {
                eprintln!("Error saving results to JSON: {}", e);
                std::process::exit(1);
            }
        }
    }

    #[cfg(feature = "cli")]
    if let Some(plot_dir) = &args.plot_dir {
        match schedsim::generate_plots(&report, plot_dir) {
            Ok(paths) => {
                if verbosity >= VerbosityLevel::Normal {
                    println!("\nGenerated plots in {:?}:", plot_dir);
                    for path in paths {
                        println!("  - {}", path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error generating plots: {}", e);
                std::process::exit(1);
            }
        }
    }

    #[cfg(not(feature = "cli"))]
    if args.plot_dir.is_some() {
        eprintln!("Plotting requires the `cli` feature; skipping --plot-dir");
    }
}

fn print_quiet(report: &SimulationReport) {
    for run in &report.runs {
        println!(
            "{:<5} makespan={} avg_turnaround={:.2} avg_waiting={:.2} avg_response={:.2}",
            run.policy.name().to_uppercase(),
            run.summary.makespan,
            run.summary.avg_turnaround_time,
            run.summary.avg_waiting_time,
            run.summary.avg_response_time
        );
    }
}

fn save_report_json(
    report: &SimulationReport,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}

#[cfg(feature = "cli")]
fn print_heading(text: &str, use_color: bool) {
    if use_color {
        println!("{}", text.bright_cyan().bold());
    } else {
        println!("{}", text);
    }
}

#[cfg(feature = "cli")]
fn print_processes(simulator: &Simulator, use_color: bool) {
    print_heading("PROCESSES", use_color);
    let rows: Vec<ProcessRow> = simulator
        .processes()
        .iter()
        .map(|p| ProcessRow {
            id: p.id.clone(),
            arrival: p.arrival_time,
            burst: p.burst_time,
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));
}

#[cfg(feature = "cli")]
fn print_run(run: &PolicyRun, use_color: bool) {
    let title = format!("\n{}", run.policy.display_name().to_uppercase());
    if use_color {
        println!("{}", title.yellow().bold());
        println!("{}", "━".repeat(80).bright_black());
    } else {
        println!("{}", title);
        println!("{}", "━".repeat(80));
    }

    let intervals: Vec<IntervalRow> = run
        .timeline
        .iter()
        .map(|i| IntervalRow {
            id: i.process_id.clone(),
            start: i.start_time,
            end: i.end_time,
            duration: i.duration(),
        })
        .collect();
    println!("{}", Table::new(&intervals).with(Style::rounded()));

    println!("\n{}\n", render_gantt(&run.timeline));

    let metrics: Vec<ProcessMetricsRow> = run
        .processes
        .iter()
        .map(|m| ProcessMetricsRow {
            id: m.id.clone(),
            completion: m.completion_time,
            turnaround: m.turnaround_time,
            waiting: m.waiting_time,
            response: m.response_time,
            preemptions: m.num_preemptions,
        })
        .collect();
    println!("{}", Table::new(&metrics).with(Style::rounded()));
    run.summary.print();
}

#[cfg(feature = "cli")]
fn print_comparison(report: &SimulationReport, use_color: bool) {
    if use_color {
        println!("\n{}", "POLICY COMPARISON".yellow().bold());
    } else {
        println!("\nPOLICY COMPARISON");
    }

    let rows: Vec<ComparisonRow> = report
        .runs
        .iter()
        .map(|run| ComparisonRow {
            policy: run.policy.display_name().to_string(),
            makespan: run.summary.makespan,
            turnaround: format!("{:.2}", run.summary.avg_turnaround_time),
            waiting: format!("{:.2}", run.summary.avg_waiting_time),
            response: format!("{:.2}", run.summary.avg_response_time),
            switches: run.summary.context_switches,
        })
        .collect();
    println!("{}", Table::new(&rows).with(Style::rounded()));

    let comparison = report.comparison();
    if let Some(best) = comparison.best_by_waiting_time() {
        let name = best.display_name();
        if use_color {
            println!("  • Lowest avg waiting:    {}", name.green().bold());
        } else {
            println!("  • Lowest avg waiting:    {}", name);
        }
    }
    if let Some(best) = comparison.best_by_turnaround_time() {
        let name = best.display_name();
        if use_color {
            println!("  • Lowest avg turnaround: {}", name.green().bold());
        } else {
            println!("  • Lowest avg turnaround: {}", name);
        }
    }
    if let Some(best) = comparison.best_by_response_time() {
        let name = best.display_name();
        if use_color {
            println!("  • Lowest avg response:   {}", name.green().bold());
        } else {
            println!("  • Lowest avg response:   {}", name);
        }
    }
}

// Fallbacks for when CLI features are not available

#[cfg(not(feature = "cli"))]
fn print_heading(text: &str, _use_color: bool) {
    println!("{}", text);
}

#[cfg(not(feature = "cli"))]
fn print_processes(simulator: &Simulator, _use_color: bool) {
    println!("PROCESSES");
    for p in simulator.processes() {
        println!("  {:<8} arrival={:<6} burst={}", p.id, p.arrival_time, p.burst_time);
    }
}

#[cfg(not(feature = "cli"))]
fn print_run(run: &PolicyRun, _use_color: bool) {
    println!("\n{}", run.policy.display_name().to_uppercase());
    for i in &run.timeline {
        println!("  {:<8} {:>6} -> {:<6}", i.process_id, i.start_time, i.end_time);
    }
    println!("\n{}\n", render_gantt(&run.timeline));
    run.summary.print();
}

#[cfg(not(feature = "cli"))]
fn print_comparison(report: &SimulationReport, _use_color: bool) {
    let comparison = report.comparison();
    println!("\nPOLICY COMPARISON");
    for (policy, summary) in comparison.entries() {
        println!(
            "  {:<24} avg_waiting={:.2} avg_turnaround={:.2}",
            policy.display_name(),
            summary.avg_waiting_time,
            summary.avg_turnaround_time
        );
    }
}
