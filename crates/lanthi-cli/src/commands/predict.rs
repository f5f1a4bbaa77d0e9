use super::{read_record, write_json, write_record};
use crate::cli::PredictArgs;
use crate::config::PartialEngineConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use lanthipred::engine::progress::ProgressReporter;
use lanthipred::workflows::predict::Predictor;
use lanthipred::workflows::results::LanthiResults;
use tracing::{debug, info, instrument};

#[instrument(skip_all, name = "predict_command")]
pub fn run(args: PredictArgs) -> Result<()> {
    info!("Starting lanthipeptide prediction.");

    let partial_config = match &args.config {
        Some(path) => PartialEngineConfig::from_file(path)?,
        None => PartialEngineConfig::default(),
    };
    let config = partial_config.merge_with_cli(&args)?;
    debug!(?config, "Final engine configuration resolved.");

    let mut record = read_record(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let predictor = Predictor::new(config);
    info!(scorer = predictor.scorer_name(), "Boundary scorer selected.");
    let results = predictor.run(&record, &reporter)?;

    write_json(&results.to_json()?, &args.output)?;
    info!("Results written to {:?}", args.output);

    if let Some(annotate_path) = &args.annotate {
        let attached = results.add_to_record(&mut record)?;
        debug!(attached, "Attached predictions to record.");
        write_record(&record, annotate_path)?;
    }

    print_summary(&results);
    Ok(())
}

fn print_summary(results: &LanthiResults) {
    println!(
        "\nRecord {}: {} lanthipeptide(s) predicted.",
        results.record_id(),
        results.motif_count()
    );
    for (locus, motifs) in results.motifs_by_locus() {
        for motif in motifs {
            println!(
                "  {} -> {}: {}, {} bridge(s), {:.1} Da (core {})",
                locus,
                motif.precursor_locus(),
                motif.peptide_subclass(),
                motif.lan_bridges(),
                motif.monoisotopic_mass(),
                motif.core()
            );
        }
    }
}
