use crate::cli::Cli;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use confdist::core::io::matrix::{read_matrix, read_weights, write_matrix};
use confdist::engine::progress::ProgressReporter;
use confdist::workflows;
use tracing::{debug, info};

pub fn run(cli: &Cli) -> Result<()> {
    info!(input = %cli.input.display(), "Loading conformation matrix.");
    let coordinates = read_matrix(&cli.input)?;
    debug!(
        conformations = coordinates.nrows(),
        row_length = coordinates.ncols(),
        "Conformation matrix loaded."
    );

    let weights = match &cli.weights {
        Some(path) => {
            info!(weights = %path.display(), "Loading weight vector.");
            Some(read_weights(path)?)
        }
        None => None,
    };

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    let engine =
        workflows::pairwise::run(coordinates, weights, cli.threads.unwrap_or(0), &reporter)?;

    write_matrix(&cli.output, engine.distances())?;
    info!(output = %cli.output.display(), "Distance matrix written.");

    Ok(())
}
