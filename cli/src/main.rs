//! brandcopy binary: compose a brand-voice CRM prompt, call the model once, print
//! the copy options.

mod log_format;
mod logging;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use cli::{format_output, run, Args};

const APP_NAME: &str = "brandcopy";

/// Writes `text` to `file`, or to stdout when no file is given.
fn write_output(text: &str, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match file {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply(APP_NAME, None::<&Path>).ok();
    let args = Args::parse();
    logging::init(args.verbose)?;

    let settings = match config::load_settings(APP_NAME) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("brandcopy: config: {}", e);
            std::process::exit(1);
        }
    };

    let output = match run(&args, &settings).await {
        Ok(o) => o,
        Err(e) => {
            eprintln!("brandcopy: {}", e);
            std::process::exit(1);
        }
    };
    let text = format_output(&output, &args)?;
    write_output(&text, args.file.as_deref())?;
    Ok(())
}
