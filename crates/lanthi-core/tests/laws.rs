mod common;

use common::*;
use lanthipred::core::models::record::Record;
use lanthipred::workflows::results::LanthiResults;

fn all_records() -> Vec<Record> {
    vec![
        nisin_record(),
        epidermin_record(),
        microbisporicin_record(),
        epicidin_record(),
        lactocin_s_record(),
        labyrinthopeptin_record(),
        lanl_record(),
    ]
}

#[test]
fn json_round_trip_is_exact_for_every_scenario() {
    for record in all_records() {
        let results = run_without_tool(&record);
        let first = results.to_json().unwrap();
        let restored = LanthiResults::from_json(&first, &record).unwrap();
        assert_eq!(restored.to_json().unwrap(), first, "record {}", record.id());

        let text = serde_json::to_string(&first).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let restored = LanthiResults::from_json(&reparsed, &record).unwrap();
        assert_eq!(restored.to_json().unwrap(), first, "record {}", record.id());
    }
}

#[test]
fn add_to_record_adds_exactly_one_annotation_per_motif() {
    for mut record in all_records() {
        let results = run_without_tool(&record);
        let expected: usize = results.motifs_by_locus().values().map(Vec::len).sum();
        let before = record.cds_motifs().len();
        let added = results.add_to_record(&mut record).unwrap();
        assert_eq!(added, expected);
        assert_eq!(record.cds_motifs().len(), before + expected);
    }
}

#[test]
fn add_to_record_is_not_idempotent() {
    let mut record = nisin_record();
    let results = run_without_tool(&record);
    results.add_to_record(&mut record).unwrap();
    let once = record.cds_motifs().len();
    results.add_to_record(&mut record).unwrap();
    assert_eq!(record.cds_motifs().len(), 2 * once);
}

#[test]
fn toggling_the_tool_keeps_cluster_membership() {
    for record in all_records() {
        let without = run_without_tool(&record);
        let with = run_with_boundary(&record, 26);
        assert_eq!(without.clusters(), with.clusters(), "record {}", record.id());
        let without_loci: Vec<_> = without.motifs_by_locus().keys().collect();
        let with_loci: Vec<_> = with.motifs_by_locus().keys().collect();
        assert_eq!(without_loci, with_loci);
    }
}

#[test]
fn alternative_weights_are_bounded_and_increasing() {
    for record in all_records() {
        let results = run_without_tool(&record);
        for motif in gather_all_motifs(&results) {
            let weights = motif.alternative_weights();
            assert!(weights.len() <= 4);
            assert!(weights.windows(2).all(|w| w[0] < w[1]));
            if let Some(first) = weights.first() {
                assert!(*first > motif.molecular_weight());
                assert!(weights[weights.len() - 1] - motif.molecular_weight() < 4.0 * 18.1);
            }
        }
    }
}

#[test]
fn results_are_reproducible_across_runs() {
    let record = microbisporicin_record();
    let first = run_without_tool(&record).to_json().unwrap();
    let second = run_without_tool(&record).to_json().unwrap();
    assert_eq!(first, second);
}
