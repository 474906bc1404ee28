use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_malformed_csv_handling() {
    let dir = tempfile::tempdir().unwrap();
    let (catalog, users) = common::write_seed_files(dir.path());
    let commands = common::write_csv(
        dir.path(),
        "commands.csv",
        &[
            "op, user, product, quantity, address",
            "add, u1, p1, 1",
            // Unknown operation
            "refund, u1, p1, 1",
            // Quantity is not a number
            "add, u1, p2, lots",
            // Add without a quantity
            "add, u1, p2",
            "add, u1, p2, 2",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("cartflow"));
    cmd.arg(&commands)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--users")
        .arg(&users);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stderr(predicate::str::contains("requires a quantity"))
        .stdout(predicate::str::contains("u1,u1@example.com,100,1 Main St,2,20"));
}

#[test]
fn test_unknown_user_and_product() {
    let dir = tempfile::tempdir().unwrap();
    let (catalog, users) = common::write_seed_files(dir.path());
    let commands = common::write_csv(
        dir.path(),
        "commands.csv",
        &[
            "op, user, product, quantity, address",
            "add, ghost, p1, 1",
            "add, u1, nope, 1",
            "add, u1, p1, 0",
            "add, u1, p2, 1",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("cartflow"));
    cmd.arg(&commands)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--users")
        .arg(&users);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing command"))
        .stderr(predicate::str::contains("Product doesn't exist in database"))
        .stderr(predicate::str::contains("Quantity must be at least 1"))
        .stdout(predicate::str::contains("u1,u1@example.com,100,1 Main St,1,5"))
        .stdout(predicate::str::contains("ghost").not());
}

#[test]
fn test_price_at_decimal_limit_does_not_abort_replay() {
    let dir = tempfile::tempdir().unwrap();
    let (_, users) = common::write_seed_files(dir.path());
    let catalog = common::write_csv(
        dir.path(),
        "big_products.csv",
        &["id, name, cost", "big, Yacht, 79228162514264337593543950335"],
    );
    let commands = common::write_csv(
        dir.path(),
        "commands.csv",
        &[
            "op, user, product, quantity, address",
            "add, u1, big, 2",
            "add, u1, big, 1",
            "checkout, u1",
        ],
    );

    let mut cmd = Command::new(cargo_bin!("cartflow"));
    cmd.arg(&commands)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--users")
        .arg(&users);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Amount exceeds the supported range"))
        .stderr(predicate::str::contains("Insufficient Balance"))
        .stdout(predicate::str::contains(
            "u1,u1@example.com,100,1 Main St,1,79228162514264337593543950335",
        ));
}
