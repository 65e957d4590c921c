//! Integration tests for the tasktrack CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Get a Command for the tasktrack binary pointed at a temp database
fn tasktrack(db: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("tasktrack"));
    cmd.arg("--db").arg(db);
    cmd
}

fn temp_db(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("task_list.db")
}

#[test]
fn test_help() {
    Command::new(cargo::cargo_bin!("tasktrack"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track personal tasks"));
}

#[test]
fn test_version() {
    Command::new(cargo::cargo_bin!("tasktrack"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_add_normalizes_and_shows() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db)
        .args(["add", "buy milk", "--category", "groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy Milk"))
        .stdout(predicate::str::contains("GROCERIES"));

    tasktrack(&db)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy Milk"))
        .stdout(predicate::str::contains("To Do"));
}

#[test]
fn test_add_uses_default_category() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db)
        .args(["add", "call IBM rep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Call IBM Rep"))
        .stdout(predicate::str::contains("UNASSIGNED"));
}

#[test]
fn test_done_marks_completed() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "buy milk"]).assert().success();

    tasktrack(&db)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked as completed"))
        .stdout(predicate::str::contains("Done"))
        .stdout(predicate::str::contains("All tasks completed"));
}

#[test]
fn test_working_marks_in_progress() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "buy milk"]).assert().success();

    tasktrack(&db)
        .args(["working", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress"));
}

#[test]
fn test_delete_renumbers_remaining_tasks() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    for task in ["first task", "second task", "third task"] {
        tasktrack(&db).args(["add", task]).assert().success();
    }

    tasktrack(&db)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 2"))
        .stdout(predicate::str::contains("Second Task").not());

    // The survivor that was third is now row 2.
    let output = tasktrack(&db).arg("show").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let third_row = stdout.lines().find(|l| l.contains("Third Task")).unwrap();
    assert!(third_row.trim_start().starts_with('2'));
}

#[test]
fn test_delete_out_of_range_is_informational() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "only task"]).assert().success();

    tasktrack(&db)
        .args(["delete", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No task at position 5"))
        .stdout(predicate::str::contains("Only Task"));
}

#[test]
fn test_delete_zero_points_to_wipe() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "only task"]).assert().success();

    tasktrack(&db)
        .args(["delete", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wipe --force"));

    // Nothing was deleted.
    tasktrack(&db)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Only Task"));
}

#[test]
fn test_wipe_requires_force() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "only task"]).assert().success();

    tasktrack(&db)
        .arg("wipe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    tasktrack(&db)
        .args(["wipe", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All tasks deleted"))
        .stdout(predicate::str::contains("No tasks to show"));
}

#[test]
fn test_update_changes_only_supplied_fields() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db)
        .args(["add", "buy milk", "--category", "groceries"])
        .assert()
        .success();

    tasktrack(&db)
        .args(["update", "1", "--category", "errands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ERRANDS"))
        .stdout(predicate::str::contains("Buy Milk"));
}

#[test]
fn test_archive_hides_until_filtered() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "old chore"]).assert().success();
    tasktrack(&db).args(["add", "new chore"]).assert().success();

    tasktrack(&db)
        .args(["archive", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task 1 archived"));

    // Gone from the default listing.
    tasktrack(&db)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("New Chore"))
        .stdout(predicate::str::contains("Old Chore").not());

    // Revealed by the archive filter, at the end with its new category.
    tasktrack(&db)
        .args(["show", "archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Chore"))
        .stdout(predicate::str::contains("ARCHIVE"));
}

#[test]
fn test_row_numbers_stay_addressable_past_hidden_rows() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "alpha"]).assert().success();
    tasktrack(&db).args(["add", "beta"]).assert().success();
    // Alpha moves to the end archived, then gamma lands after it, so the
    // hidden row sits in the middle of the ordering.
    tasktrack(&db).args(["archive", "1"]).assert().success();
    tasktrack(&db).args(["add", "gamma"]).assert().success();

    // Gamma is the second visible row but is numbered by its position.
    let output = tasktrack(&db).arg("show").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let gamma = stdout.lines().find(|l| l.contains("Gamma")).unwrap();
    assert!(gamma.trim_start().starts_with('3'));

    // Feeding that number back completes gamma, not the hidden archived row.
    tasktrack(&db).args(["done", "3"]).assert().success();

    let output = tasktrack(&db).arg("show").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let gamma = stdout.lines().find(|l| l.contains("Gamma")).unwrap();
    assert!(gamma.contains("Done") && !gamma.contains("Not-Done"));

    let output = tasktrack(&db).args(["show", "archive"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let alpha = stdout.lines().find(|l| l.contains("Alpha")).unwrap();
    assert!(alpha.contains("Archived"));
    // Never completed: the archived row still carries the sentinel.
    assert!(alpha.contains("Not-Done"));
}

#[test]
fn test_update_without_fields_reports_missing_position() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db).args(["add", "only task"]).assert().success();

    tasktrack(&db)
        .args(["update", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No task at position 9"))
        .stdout(predicate::str::contains("Updated task 9").not());
}

#[test]
fn test_show_category_filter() {
    let temp = TempDir::new().unwrap();
    let db = temp_db(&temp);

    tasktrack(&db)
        .args(["add", "buy milk", "--category", "groceries"])
        .assert()
        .success();
    tasktrack(&db)
        .args(["add", "call mom", "--category", "family"])
        .assert()
        .success();

    tasktrack(&db)
        .args(["show", "family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Call Mom"))
        .stdout(predicate::str::contains("Buy Milk").not());

    // Unknown category is not an error; it just matches nothing.
    tasktrack(&db)
        .args(["show", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks to show"));
}

#[test]
fn test_db_parent_directory_created_on_first_run() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("fresh/config/task_list.db");

    tasktrack(&db).args(["add", "buy milk"]).assert().success();
    assert!(db.exists());
}
