#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_book_then_cancel_across_runs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: commit a single-passenger booking of 430.
    let mut csv1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv1, "{}", common::HEADER).unwrap();
    writeln!(csv1, "{}", common::book_row("430", "Priya Nair:female:30")).unwrap();

    let mut cmd1 = Command::new(cargo_bin!("skybook"));
    cmd1.arg(csv1.path())
        .arg("--opening-balance")
        .arg("1000")
        .arg("--db-path")
        .arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("balance,570"));
    let booking_id = common::first_booking_id(&stdout1).expect("report should list the booking");

    // 2. Second run: cancel it through the same DB path.
    let mut csv2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv2, "{}", common::HEADER).unwrap();
    writeln!(csv2, "{}", common::cancel_row(&booking_id)).unwrap();

    let mut cmd2 = Command::new(cargo_bin!("skybook"));
    cmd2.arg(csv2.path()).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // Refund restores the opening balance; the booking survives as cancelled.
    assert!(stdout2.contains("balance,1000"));
    assert!(stdout2.contains("deposit,430"));
    assert!(stdout2.contains(&format!("{booking_id},FL-204,BOM->DEL,cancelled")));
}
