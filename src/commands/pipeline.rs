use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use pipectl::config;
use pipectl::gate::GateClient;
use pipectl::pipeline::{self, PatchRequest};

use super::CmdResult;

#[derive(Args)]
pub struct PipelineArgs {
    #[command(subcommand)]
    command: PipelineCommand,
}

#[derive(Subcommand)]
enum PipelineCommand {
    /// Fetch the specified pipeline definition
    Get(GetArgs),
    /// Patch the specified pipeline definition
    Patch(PatchArgs),
}

// Identifier flags default to "" so missing values surface as structured
// validation errors instead of clap usage output.
#[derive(Args)]
struct GetArgs {
    /// Application the pipeline belongs to
    #[arg(short, long, default_value = "")]
    application: String,

    /// Name of the pipeline
    #[arg(short, long, default_value = "")]
    name: String,
}

#[derive(Args)]
struct PatchArgs {
    /// Application the pipeline belongs to
    #[arg(short, long, default_value = "")]
    application: String,

    /// Name of the pipeline
    #[arg(short, long, default_value = "")]
    name: String,

    /// Patch value as a JSON merge-patch body
    #[arg(short, long, default_value = "")]
    patch: String,

    /// Enable the pipeline
    #[arg(long)]
    enable: bool,

    /// Disable the pipeline (wins over --enable)
    #[arg(long)]
    disable: bool,
}

#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    command: String,
    application: String,
    name: String,
    pipeline: Value,
}

pub fn run(args: PipelineArgs, global: &crate::commands::GlobalArgs) -> CmdResult<PipelineOutput> {
    let config = config::load(global.gate_endpoint.as_deref())?;
    let gate = GateClient::new(&config)?;

    match args.command {
        PipelineCommand::Get(args) => get(&gate, args),
        PipelineCommand::Patch(args) => patch(&gate, args),
    }
}

fn get(gate: &GateClient, args: GetArgs) -> CmdResult<PipelineOutput> {
    let result = pipeline::get(gate, &args.application, &args.name)?;

    Ok((
        PipelineOutput {
            command: "pipeline.get".to_string(),
            application: args.application,
            name: args.name,
            pipeline: result,
        },
        0,
    ))
}

fn patch(gate: &GateClient, args: PatchArgs) -> CmdResult<PipelineOutput> {
    let request = PatchRequest {
        application: args.application,
        name: args.name,
        patch: args.patch,
        enable: args.enable,
        disable: args.disable,
    };

    let merged = pipeline::patch(gate, &request)?;

    Ok((
        PipelineOutput {
            command: "pipeline.patch".to_string(),
            application: request.application,
            name: request.name,
            pipeline: merged,
        },
        0,
    ))
}
