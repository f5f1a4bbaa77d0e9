use super::{read_json, read_record, write_record};
use crate::cli::RestoreArgs;
use crate::error::Result;
use lanthipred::workflows::results::LanthiResults;
use tracing::{info, instrument};

#[instrument(skip_all, name = "restore_command")]
pub fn run(args: RestoreArgs) -> Result<()> {
    let mut record = read_record(&args.record)?;
    let data = read_json(&args.input)?;

    let results = LanthiResults::from_json(&data, &record)?;
    info!(
        loci = results.motifs_by_locus().len(),
        motifs = results.motif_count(),
        "Restored previous results."
    );

    let attached = results.add_to_record(&mut record)?;
    write_record(&record, &args.annotate)?;

    println!(
        "\nAttached {} prepeptide annotation(s) to record {}.",
        attached,
        record.id()
    );
    Ok(())
}
