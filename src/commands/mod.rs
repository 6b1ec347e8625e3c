pub type CmdResult<T> = pipectl::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Gate endpoint override from the root --gate-endpoint flag.
    pub gate_endpoint: Option<String>,
}

pub mod pipeline;

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (pipectl::Result<serde_json::Value>, i32) {
    crate::tty::status("pipectl is working...");

    match command {
        crate::Commands::Pipeline(args) => {
            crate::output::map_cmd_result_to_json(pipeline::run(args, global))
        }
    }
}
