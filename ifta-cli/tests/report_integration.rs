//! End-to-end checks of the report and session paths against fixture files.

use std::path::PathBuf;

use ifta_cli::app;
use ifta_cli::session::Session;
use ifta_core::IftaConfig;
use pretty_assertions::assert_eq;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("balanced.csv")
}

#[test]
fn test_report_from_fixture_file() {
    let ledger = app::load_ledger(&fixture_path()).expect("fixture should load");

    let table = app::render_report(&ledger.report());

    assert!(table.contains(" 1  Texas           100        5       0.4    10.00     2.00\n"));
    assert!(table.contains(" 2  Ontario         100       15       0.4    10.00    -2.00\n"));
    assert!(table.ends_with("Fleet MPG: 10.00\n"));
}

#[test]
fn test_fixture_jurisdictions_are_all_known() {
    let ledger = app::load_ledger(&fixture_path()).unwrap();

    let flagged = app::warn_unknown_jurisdictions(&IftaConfig::default(), ledger.rows());

    assert_eq!(flagged, 0);
}

#[test]
fn test_session_continues_from_fixture_rows() {
    let ledger = app::load_ledger(&fixture_path()).unwrap();
    let mut session = Session::with_ledger(IftaConfig::default(), ledger);
    let mut out = Vec::new();

    session
        .run("set 2 gallons 5\nadd Alabama\nquit\n".as_bytes(), &mut out)
        .expect("session should run");

    let report = session.ledger().report();
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.totals.fleet_mpg, 20.0);
    assert_eq!(report.rows[2].row.jurisdiction, "Alabama");
    // new ids continue after the imported rows
    assert_eq!(report.rows[2].row.id.0, 3);
}
