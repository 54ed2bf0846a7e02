use std::io;

use anyhow::Context;
use clap::Parser;
use tsperf_core::prelude::Env;
use tsperf_matrix::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = GenerateMatrixCli::parse();

    if cli.list_presets {
        for name in Preset::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let preset = cli.preset.as_deref().context("No preset given")?;

    // Nothing may be printed if the preset is unknown, so generate before reporting anything
    let matrix = generate_matrix_for(preset, cli.baselining)?;
    log::info!("Preset '{preset}' expanded to {} job(s)", matrix.jobs.len());

    let mut reporter = cli.ci.reporter(&Env::from_process())?;
    write_matrix(&matrix, io::stdout(), reporter.as_mut())
}
