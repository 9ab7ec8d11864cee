//! Integration tests for masspool
//!
//! These tests run the four stages end to end through files on disk.

use masspool::annotate::{annotate_table, output_path, AnnotateOptions, FailurePolicy};
use masspool::chem::SmilesCalculator;
use masspool::export::{
    collect_transfers, group_by_well, write_lookup_files, write_transfer_file, EchoFormatter,
    LookupColumns, PcdlFormatter, TransferColumns, PCDL_HEADER_LINES,
};
use masspool::plate::PlateFormat;
use masspool::pooling::{
    write_outputs, CompoundRecord, OutputPaths, PoolingConfig, PoolingEngine, PoolingError,
};
use masspool::table::{Delimiter, Table};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const LIBRARY: &str = "\
sample\tMOLSMILES\tSourcePlate\tSourceWell
caffeine\tCN1C=NC2=C1C(=O)N(C(=O)N2C)C\tLIB01\tA01
ethanol\tCCO\tLIB01\tA02
benzene\tc1ccccc1\tLIB01\tB01
acetic_acid\tCC(=O)O\tLIB01\tB02
pyridine\tc1ccncc1\tLIB02\tAA10
glycine\tNCC(=O)O\tLIB02\tP24
";

fn write_library(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("library.txt");
    fs::write(&path, LIBRARY).unwrap();
    path
}

/// Annotate, pool, and export a small library
#[test]
fn test_full_pipeline() {
    let dir = tempdir().unwrap();
    let library = write_library(dir.path());

    // Stage 1: annotation
    let mut table = Table::read_path(&library, Delimiter::Tab).unwrap();
    let stats = annotate_table(&mut table, &SmilesCalculator, &AnnotateOptions::default()).unwrap();
    assert_eq!(stats.annotated, 6);
    let annotated_path = output_path(dir.path().join("library"));
    table.write_path(&annotated_path, Delimiter::Tab).unwrap();
    assert!(annotated_path.ends_with("library_exactmass_and_formula.txt"));

    // Stage 2: pooling
    let annotated = Table::read_path(&annotated_path, Delimiter::Tab).unwrap();
    assert_eq!(annotated.headers.len(), 6);
    let records = CompoundRecord::from_table(&annotated, "sample", "ExactMass").unwrap();

    let config = PoolingConfig::with_compounds_per_well(3)
        .plate_format(PlateFormat::Wells96)
        .resolution(0.005);
    let plan = PoolingEngine::new(config.clone()).pool(records).unwrap();
    assert_eq!(plan.layout().total_wells, 2);
    let report = plan.collision_report(config.resolution);
    assert!(report.is_clean());

    let prefix = dir.path().join("lib");
    let paths = OutputPaths::new(prefix.to_str().unwrap(), PlateFormat::Wells96, None);
    write_outputs(&config, &plan, &report, &annotated.headers, &paths).unwrap();
    for path in paths.all() {
        assert!(path.exists(), "missing {}", path.display());
    }

    let pooled = Table::read_path(&paths.compounds, Delimiter::Comma).unwrap();
    assert_eq!(pooled.len(), 6);
    assert_eq!(&pooled.headers[6..], ["PoolPlate", "PoolWell"]);
    // Lightest compound (ethanol, 46.04) opens the first well
    assert_eq!(pooled.rows[0][0], "ethanol");
    assert_eq!(pooled.rows[0][7], "A01");

    // Stage 3: Echo picklist
    let transfer_columns = TransferColumns {
        source_plate: "SourcePlate".into(),
        source_well: "SourceWell".into(),
        destination_plate: "PoolPlate".into(),
        destination_well: "PoolWell".into(),
    };
    let transfers = collect_transfers(&pooled, &transfer_columns, 2.5).unwrap();
    let picklist =
        write_transfer_file(&EchoFormatter, &transfers, dir.path().join("echo")).unwrap();
    let echo = fs::read_to_string(&picklist).unwrap();
    assert!(picklist.ends_with("echo.csv"));
    assert_eq!(echo.lines().count(), 7);
    assert!(echo.lines().any(|l| l == "LIB02,10,27,1,2,1,2.5" || l == "LIB02,10,27,1,1,1,2.5"));

    // Stage 4: PCDL lookups
    let lookup_columns = LookupColumns {
        plate: "PoolPlate".into(),
        well: "PoolWell".into(),
        sample: "sample".into(),
        formula: "MolecularFormula".into(),
    };
    let groups = group_by_well(&pooled, &lookup_columns).unwrap();
    let out_dir = dir.path().join("pcdl");
    let files = write_lookup_files(&PcdlFormatter, &groups, &out_dir).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("plate_1_well_A01_0001.csv"));
    assert!(files[1].ends_with("plate_1_well_A02_0002.csv"));

    let first = fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = first.lines().collect();
    assert_eq!(lines[..4], PCDL_HEADER_LINES);
    assert_eq!(lines[4], "Name,Formula");
    assert_eq!(lines.len(), 8);
    assert!(lines.contains(&"ethanol,C2H6O"));
}

/// Unparsable structures are kept blank, and pooling then refuses them by row
#[test]
fn test_blank_structure_blocks_pooling() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "sample\tMOLSMILES\nok\tCCO\nbroken\tC1CC(\nalso_ok\tO\n").unwrap();

    let mut table = Table::read_path(&path, Delimiter::Tab).unwrap();
    let stats = annotate_table(&mut table, &SmilesCalculator, &AnnotateOptions::default()).unwrap();
    assert_eq!(stats.failed, 1);

    let err = CompoundRecord::from_table(&table, "sample", "ExactMass").unwrap_err();
    assert!(matches!(err, PoolingError::MissingMass { row: 2, .. }));

    // Skipping instead lets the remaining rows through
    let mut table = Table::read_path(&path, Delimiter::Tab).unwrap();
    let options = AnnotateOptions {
        on_error: FailurePolicy::Skip,
        ..Default::default()
    };
    annotate_table(&mut table, &SmilesCalculator, &options).unwrap();
    let records = CompoundRecord::from_table(&table, "sample", "ExactMass").unwrap();
    assert_eq!(records.len(), 2);
}

/// A rejected configuration leaves no output behind
#[test]
fn test_invalid_configuration_writes_nothing() {
    let dir = tempdir().unwrap();
    let records = vec![
        CompoundRecord::new(0, "a", 100.0),
        CompoundRecord::new(1, "b", 200.0),
    ];

    let result = PoolingEngine::new(PoolingConfig::with_total_wells(3)).pool(records);
    assert!(matches!(result, Err(PoolingError::Config(_))));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Multi-plate pooling numbers plates from 1 and restarts wells at A01
#[test]
fn test_second_plate_in_outputs() {
    let dir = tempdir().unwrap();
    let records: Vec<CompoundRecord> = (0..200)
        .map(|i| CompoundRecord::new(i, format!("C{}", i), 100.0 + i as f64 * 0.5))
        .collect();
    let config = PoolingConfig::with_total_wells(100).plate_format(PlateFormat::Wells96);
    let plan = PoolingEngine::new(config.clone()).pool(records).unwrap();
    let report = plan.collision_report(config.resolution);

    let prefix = dir.path().join("multi");
    let paths = OutputPaths::new(
        prefix.to_str().unwrap(),
        PlateFormat::Wells96,
        Some("20250101_000000"),
    );
    let headers = vec!["sample".to_string(), "ExactMass".to_string()];
    write_outputs(&config, &plan, &report, &headers, &paths).unwrap();

    let summary = fs::read_to_string(&paths.collisions_summary).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 101);
    assert_eq!(rows[96], "1,H12,0");
    assert_eq!(rows[97], "2,A01,0");
    assert_eq!(rows[100], "2,A04,0");
}
