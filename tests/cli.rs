use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn sample_path() -> String {
    format!("{}/data/sample_listings.csv", env!("CARGO_MANIFEST_DIR"))
}

fn bin() -> Command {
    Command::cargo_bin("market-hotspot").unwrap()
}

#[test]
fn test_sample_dataset_json_report() {
    let output = bin().arg("--input").arg(sample_path()).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["hotspot"]["neighborhood"], "Midtown");
    assert_eq!(report["old_date"], "2023-10-01");
    assert_eq!(report["new_date"], "2023-10-31");

    // 成長率の降順に並ぶ
    let growth = report["growth"].as_array().unwrap();
    let names: Vec<&str> = growth
        .iter()
        .map(|g| g["neighborhood"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Midtown", "Downtown", "Uptown"]);
    assert!((growth[0]["growth_pct"].as_f64().unwrap() - 8.333).abs() < 1e-9);
    assert!((growth[1]["growth_pct"].as_f64().unwrap() - 6.667).abs() < 1e-9);
    assert!((growth[2]["growth_pct"].as_f64().unwrap() + 1.176).abs() < 1e-9);
    assert!((growth[2]["old_price_per_area"].as_f64().unwrap() - 708.333).abs() < 1e-9);

    let rows = report["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["id"], "4");
    assert_eq!(rows[0]["price_per_area"].as_f64().unwrap(), 600.0);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("HOTSPOT DETECTED: Midtown with 8.33% growth"));
}

#[test]
fn test_top_limits_growth_records() {
    let output = bin()
        .args(["--input", &sample_path(), "--top", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let growth = report["growth"].as_array().unwrap();
    assert_eq!(growth.len(), 1);
    assert_eq!(growth[0]["neighborhood"], "Midtown");
    assert_eq!(report["rows"].as_array().unwrap().len(), 3);
}

#[test]
fn test_csv_output_rows() {
    bin()
        .args(["--input", &sample_path(), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,neighborhood,price,area,lat,lon,observed_at,price_per_area,growth_pct\n",
        ))
        .stdout(predicate::str::contains("4,Downtown,"))
        .stdout(predicate::str::contains(",2023-10-31,684.211,8.333"))
        .stdout(predicate::str::contains("2023-10-01").not());
}

#[test]
fn test_exclude_pattern_changes_hotspot() {
    let output = bin()
        .args(["--input", &sample_path(), "--exclude", "Mid*"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["hotspot"]["neighborhood"], "Downtown");
}

#[test]
fn test_unsupported_format_fails() {
    bin()
        .args(["--input", &sample_path(), "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format: xml"));
}

#[test]
fn test_missing_input_fails() {
    bin()
        .args(["--input", "no/such/listings.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open listing file"));
}

#[test]
fn test_zero_area_policy() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "id,neighborhood,price,area,lat,lon,observed_at\n\
         1,Downtown,450000,800,40.71,-74.00,2023-10-01\n\
         2,Downtown,480000,800,40.71,-74.00,2023-10-31\n\
         3,Downtown,500000,0,40.71,-74.00,2023-10-31\n"
    )
    .unwrap();

    bin()
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("listing 3 has zero area"));

    let output = bin()
        .arg("--input")
        .arg(file.path())
        .arg("--skip-zero-area")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["diagnostics"]["skipped_listings"][0], "3");
    assert_eq!(report["rows"].as_array().unwrap().len(), 1);
}

#[test]
fn test_no_overlapping_neighborhood_fails() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "id,neighborhood,price,area,lat,lon,observed_at\n\
         1,Downtown,450000,800,40.71,-74.00,2023-10-01\n\
         2,Uptown,840000,1200,40.73,-73.98,2023-10-31\n"
    )
    .unwrap();

    bin()
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no neighborhood appears in both snapshots"));
}
