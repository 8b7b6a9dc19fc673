//! brandcopy CLI library: argument parsing, settings resolution and one generate
//! action per invocation. The `brandcopy` binary in `main.rs` wires these to the
//! process (config, logging, output file).

mod args;
mod run;

pub use args::Args;
pub use run::{
    format_output, load_profile, resolve, run, run_with_llm, ResolvedRun, RunError, RunOutput,
};
