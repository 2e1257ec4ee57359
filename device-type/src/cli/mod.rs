use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use wiotp_utils::{logger, serde as serde_utils, signal};

use crate::action::{CreateDeviceType, to_action_result};
use crate::config::AppConfig;
use crate::params::InvocationInput;
use crate::proxy;

#[derive(Parser)]
#[clap(name = "create-device-type")]
#[clap(version = version_string())]
#[clap(subcommand_required = true, arg_required_else_help = true)]
pub struct App {
    #[clap(subcommand)]
    cmd: Cmd,
}

impl App {
    pub fn run(self) -> Result<ExitCode> {
        self.cmd.run()
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the action once and print its result as JSON.
    Invoke(CmdInvoke),

    /// Serve the action over the action runtime protocol.
    Serve(CmdServe),
}

impl Cmd {
    fn run(self) -> Result<ExitCode> {
        match self {
            Cmd::Invoke(cmd) => cmd.run(),
            Cmd::Serve(cmd) => cmd.run().map(|()| ExitCode::SUCCESS),
        }
    }
}

#[derive(Args)]
struct ConfigArgs {
    /// Path to the action config.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Path to the logger targets config.
    #[clap(short, long)]
    logger_config: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<AppConfig> {
        match self.config.as_ref() {
            Some(path) => {
                serde_utils::load_json_from_file(path).context("failed to load action config")
            }
            None => Ok(AppConfig::default()),
        }
    }

    fn init_logger(&self, config: &AppConfig) -> Result<()> {
        logger::init_logger(&config.logger, self.logger_config.as_deref())?;
        logger::set_abort_with_tracing();
        Ok(())
    }
}

#[derive(Parser)]
struct CmdInvoke {
    /// Path to a JSON object with the invocation params. Read from stdin if omitted.
    #[clap(short, long)]
    params: Option<PathBuf>,

    #[clap(flatten)]
    args: ConfigArgs,
}

impl CmdInvoke {
    fn run(self) -> Result<ExitCode> {
        let config = self.args.load()?;
        let input = load_params(self.params.as_deref())?;

        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(self.run_impl(config, input))
    }

    async fn run_impl(self, config: AppConfig, input: InvocationInput) -> Result<ExitCode> {
        self.args.init_logger(&config)?;

        let action = CreateDeviceType::from_config(&config)?;
        let result = action.invoke(&input).await;

        println!("{}", serde_json::to_string_pretty(&to_action_result(&result))?);

        Ok(match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        })
    }
}

#[derive(Parser)]
struct CmdServe {
    #[clap(flatten)]
    args: ConfigArgs,
}

impl CmdServe {
    fn run(self) -> Result<()> {
        let config = self.args.load()?;

        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(signal::run_or_terminate(self.run_impl(config)))
    }

    async fn run_impl(self, config: AppConfig) -> Result<()> {
        self.args.init_logger(&config)?;

        let action = CreateDeviceType::from_config(&config)?;
        proxy::serve(config.proxy, action).await
    }
}

fn load_params(path: Option<&Path>) -> Result<InvocationInput> {
    match path {
        Some(path) => {
            serde_utils::load_json_from_file(path).context("failed to load invocation params")
        }
        None => serde_utils::load_json_from_reader(std::io::stdin().lock())
            .context("failed to read invocation params from stdin"),
    }
}

fn version_string() -> &'static str {
    static STRING: OnceLock<String> = OnceLock::new();
    STRING.get_or_init(|| format!("(release {ACTION_VERSION}) (rustc {RUSTC_VERSION})"))
}

static ACTION_VERSION: &str = env!("ACTION_VERSION");
static RUSTC_VERSION: &str = env!("ACTION_RUSTC_VERSION");
