use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::pipeline;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "pipectl")]
#[command(version = VERSION)]
#[command(about = "CLI for managing remotely stored pipeline configurations")]
struct Cli {
    /// Gate service endpoint (overrides config file and PIPECTL_GATE_ENDPOINT)
    #[arg(long, global = true, value_name = "URL")]
    gate_endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage pipeline configurations
    #[command(visible_alias = "pipelines")]
    Pipeline(pipeline::PipelineArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        gate_endpoint: cli.gate_endpoint,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if output::print_json_result(json_result).is_err() {
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
