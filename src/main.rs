use clap::{Parser, Subcommand};
use colored::Colorize;
use std::net::IpAddr;
use std::path::PathBuf;

use webtest_agents::parser::yaml::{self, TestPlan};
use webtest_agents::report;
use webtest_agents::runner::{ConsoleEventListener, EventEmitter, LogEventListener};
use webtest_agents::server::{ApiServer, AppContext, ServerConfig};
use webtest_agents::utils::Config;

#[derive(Parser)]
#[command(name = "webtest-agents")]
#[command(version)]
#[command(about = "Plan, rank, execute and analyze web UI tests", long_about = None)]
struct Cli {
    /// Directory for screenshots and reports
    #[arg(long, global = true)]
    artifacts_dir: Option<PathBuf>,

    /// Page every test case starts from
    #[arg(long, global = true)]
    url: Option<String>,

    /// Show the browser window
    #[arg(long, global = true, default_value = "false")]
    headed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,

        /// Server port
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Generate a test plan
    Plan {
        /// Number of test cases (defaults to the configured plan size)
        #[arg(short, long)]
        count: Option<usize>,

        /// Write the plan as YAML instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Execute the top tests of a plan in-process
    Run {
        /// Number of tests to execute
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// YAML plan to execute instead of a freshly generated one
        #[arg(long)]
        plan: Option<PathBuf>,
    },

    /// Print a stored report
    Report {
        /// Test case name
        name: String,

        /// Output format (json, junit)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::default();
    if let Some(dir) = cli.artifacts_dir {
        config.artifacts_dir = dir;
    }
    if let Some(url) = cli.url {
        config.target_url = url;
    }
    if cli.headed {
        config.headless = false;
    }

    match cli.command {
        Commands::Serve { host, port } => {
            let (events, receiver) = EventEmitter::new();
            tokio::spawn(LogEventListener::listen(receiver));

            let ctx = AppContext::new(config, events);
            let server = ApiServer::new(ServerConfig { host, port }, ctx);
            server.start().await?;
        }

        Commands::Plan { count, output } => {
            let ctx = AppContext::new(config, EventEmitter::default());
            let tests = ctx.planner.generate(count.unwrap_or(ctx.config.plan_size));

            let total = tests.len();
            match output {
                Some(path) => {
                    yaml::write_plan_file(&TestPlan { tests }, &path)?;
                    println!(
                        "{} Plan with {} tests saved to: {}",
                        "✓".green(),
                        total,
                        path.display().to_string().cyan()
                    );
                }
                None => {
                    let json = serde_json::json!({ "total_tests": total, "tests": tests });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }
        }

        Commands::Run { top_n, plan } => {
            println!("{} Running tests against: {}", "▶".green().bold(), config.target_url.cyan());
            println!("  Artifacts: {}", config.artifacts_dir.display().to_string().cyan());

            let (events, receiver) = EventEmitter::new();
            let listener = tokio::spawn(ConsoleEventListener::listen(receiver));

            let result = {
                let ctx = AppContext::new(config, events);
                let tests = match plan {
                    Some(path) => {
                        println!("  Plan: {}", path.display().to_string().cyan());
                        yaml::parse_plan_file(&path)?.tests
                    }
                    None => ctx.planner.generate(ctx.config.plan_size),
                };
                let selected = ctx
                    .ranker
                    .select(tests, top_n.unwrap_or(ctx.config.default_top_n));

                ctx.orchestrator.run_all(&selected).await
            };

            // Context (and its emitter) is dropped; let the listener drain
            let _ = listener.await;

            let reports = result?;
            let passed = reports.iter().filter(|r| r.passed()).count();
            println!(
                "\n{} {}/{} passed",
                "✅".green().bold(),
                passed,
                reports.len()
            );
        }

        Commands::Report { name, format } => {
            let store = report::ReportStore::new(config.reports_dir());
            let rendered = report::render_report(&store, &name, &format)?;
            println!("{}", rendered);
        }
    }

    Ok(())
}
