use clap::Parser;
use odf_toolbox::cli::{Args, run, setup_logging};
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
