use super::*;
use std::io::Cursor;
use tempfile::tempdir;

const SAMPLE_TSV: &str = "sample\tMOLSMILES\tPlate\nS1\tCCO\tP1\nS2\tc1ccccc1\tP1\n";

#[test]
fn test_read_tab_separated() {
    let table = Table::from_reader(Cursor::new(SAMPLE_TSV), Delimiter::Tab).unwrap();
    assert_eq!(table.headers, vec!["sample", "MOLSMILES", "Plate"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1][1], "c1ccccc1");
    assert_eq!(table.column_index("MOLSMILES").unwrap(), 1);
}

#[test]
fn test_missing_column() {
    let table = Table::from_reader(Cursor::new(SAMPLE_TSV), Delimiter::Tab).unwrap();
    assert!(matches!(
        table.column_index("ExactMass"),
        Err(TableError::MissingColumn(name)) if name == "ExactMass"
    ));
}

#[test]
fn test_ragged_row_is_rejected() {
    let ragged = "a,b,c\n1,2,3\n4,5\n";
    let err = Table::from_reader(Cursor::new(ragged), Delimiter::Comma).unwrap_err();
    assert!(matches!(
        err,
        TableError::RowWidth { row: 2, expected: 3, found: 2 }
    ));
}

#[test]
fn test_push_column_and_write() {
    let mut table = Table::from_reader(Cursor::new(SAMPLE_TSV), Delimiter::Tab).unwrap();
    let idx = table.push_column("ExactMass", "");
    table.rows[0][idx] = "46.04".to_string();

    let mut out = Vec::new();
    table.write_to(&mut out, Delimiter::Comma).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "sample,MOLSMILES,Plate,ExactMass\nS1,CCO,P1,46.04\nS2,c1ccccc1,P1,\n"
    );
}

#[test]
fn test_delimiter_names() {
    assert_eq!("TAB".parse::<Delimiter>().unwrap(), Delimiter::Tab);
    assert_eq!(Delimiter::Space.to_string(), "space");
    assert!("pipe".parse::<Delimiter>().is_err());
}

#[test]
fn test_atomic_write_leaves_no_partial_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let result: Result<(), TableError> = write_atomic(&path, |out| {
        out.write_all(b"partial")?;
        Err(TableError::MissingColumn("boom".into()))
    });
    assert!(result.is_err());
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let table = Table::from_reader(Cursor::new(SAMPLE_TSV), Delimiter::Tab).unwrap();
    table.write_path(&path, Delimiter::Tab).unwrap();
    let reread = Table::read_path(&path, Delimiter::Tab).unwrap();
    assert_eq!(reread, table);
}

#[test]
fn test_staged_outputs_commit_together() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let mut outputs = StagedOutputs::new();
    outputs
        .stage(&first, |out| -> Result<(), TableError> { Ok(out.write_all(b"a\n")?) })
        .unwrap();
    outputs
        .stage(&second, |out| -> Result<(), TableError> { Ok(out.write_all(b"b\n")?) })
        .unwrap();
    assert_eq!(outputs.len(), 2);
    assert!(!first.exists());

    let written = outputs.commit().unwrap();
    assert_eq!(written, vec![first.clone(), second.clone()]);
    assert_eq!(std::fs::read_to_string(&second).unwrap(), "b\n");
}

#[test]
fn test_staging_onto_a_directory_fails() {
    let dir = tempdir().unwrap();
    let blocked = dir.path().join("blocked.csv");
    std::fs::create_dir(&blocked).unwrap();

    let mut outputs = StagedOutputs::new();
    let result = outputs.stage(&blocked, |out| -> Result<(), TableError> {
        Ok(out.write_all(b"x")?)
    });
    assert!(matches!(result, Err(TableError::IoError(_))));
    assert!(outputs.is_empty());
}

#[test]
fn test_failed_commit_removes_persisted_files() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let mut outputs = StagedOutputs::new();
    for path in [&first, &second] {
        outputs
            .stage(path, |out| -> Result<(), TableError> { Ok(out.write_all(b"x\n")?) })
            .unwrap();
    }
    // Destination turns into a directory between staging and commit
    std::fs::create_dir(&second).unwrap();

    assert!(outputs.commit().is_err());
    assert!(!first.exists());
    assert!(second.is_dir());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}
