//! Full report runs against small league files on disk

use soccer_viz::config::ReportConfig;
use soccer_viz::pipeline::generate_report;
use soccer_viz::soccer::{CsvSource, ReportError};
use std::path::Path;

const ENGLAND: &str = "\
Date,season,home,visitor,FT,hgoal,vgoal,division,tier,totgoal,goaldif,result
1990-08-25,1990,Arsenal,Chelsea,2-0,2,0,1,1,2,2,H
1990-12-01,1990,Chelsea,Arsenal,0-1,0,1,1,1,1,-1,A
1991-09-14,1991,Chelsea,Arsenal,2-1,2,1,1,1,3,1,H
1992-02-08,1991,Arsenal,Chelsea,0-3,0,3,1,1,3,-3,A
1992-03-21,1991,Arsenal,Everton,1-1,1,1,1,1,2,0,D
";

const FRANCE: &str = "\
Date,season,home,visitor,FT,hgoal,vgoal,tier,division,result,goaldif
1990-08-04,1990,Marseille,Lyon,3-1,3,1,1,1,H,2
1990-08-11,1990,Lyon,Nantes,0-0,0,0,1,1,D,0
1991-08-03,1991,Nantes,Marseille,1-2,1,2,1,1,A,-1
1991-08-10,1991,Marseille,Nantes,1-0,1,0,1,1,H,1
1991-08-17,1991,Lyon,Marseille,2-0,2,0,1,1,H,2
";

const GERMANY: &str = "\
Date,Season,home,visitor,FT,hgoal,vgoal,tier,division,result
1990-08-11,1990,Bayern Munich,Hamburger SV,3-0,3,0,1,1,H
1990-08-18,1990,Hamburger SV,Werder Bremen,1-1,1,1,1,1,D
1991-08-03,1991,Werder Bremen,Bayern Munich,2-3,2,3,1,1,A
1991-08-10,1991,Bayern Munich,Werder Bremen,1-0,1,0,1,1,H
1991-08-17,1991,Hamburger SV,Bayern Munich,0-2,0,2,1,1,A
";

const ITALY: &str = "\
Date,Season,home,visitor,FT,hgoal,vgoal,tier,result
1990-09-09,1990,Juventus,Inter,1-0,1,0,1,H
1990-09-16,1990,Inter,AC Milan,0-0,0,0,1,D
1991-09-01,1991,AC Milan,Juventus,2-1,2,1,1,H
1991-09-08,1991,Juventus,AC Milan,0-0,0,0,1,D
1991-09-15,1991,Inter,Juventus,1-2,1,2,1,A
";

fn write_fixture(dir: &Path) {
    for (name, body) in [
        ("england.csv", ENGLAND),
        ("france.csv", FRANCE),
        ("germany.csv", GERMANY),
        ("italy.csv", ITALY),
    ] {
        std::fs::write(dir.join(name), body).unwrap();
    }
}

fn config_for(dir: &Path) -> ReportConfig {
    ReportConfig {
        data_dir: Some(dir.to_path_buf()),
        output_file: dir.join("soccer_viz.pdf"),
        ..ReportConfig::default()
    }
}

#[test]
fn test_fixture_report_has_four_pages() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let config = config_for(dir.path());

    let source = CsvSource::new(config.resolve_data_dir().unwrap());
    let summary = generate_report(&source, &config).unwrap();

    assert_eq!(summary.pages, 4);
    assert_eq!(summary.matches, 20);

    let bytes = std::fs::read(&config.output_file).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_rerun_overwrites_output() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let config = config_for(dir.path());
    std::fs::write(&config.output_file, b"stale").unwrap();

    let source = CsvSource::new(dir.path());
    generate_report(&source, &config).unwrap();

    let bytes = std::fs::read(&config.output_file).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_missing_file_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    std::fs::remove_file(dir.path().join("germany.csv")).unwrap();
    let config = config_for(dir.path());

    let err = generate_report(&CsvSource::new(dir.path()), &config).unwrap_err();
    match err {
        ReportError::MissingInput { path } => assert!(path.ends_with("germany.csv")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!config.output_file.exists());
}

#[test]
fn test_missing_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    std::fs::write(
        dir.path().join("italy.csv"),
        "season,home,visitor,hgoal,vgoal,result\n1990,Inter,Roma,1,0,H\n",
    )
    .unwrap();
    let config = config_for(dir.path());

    let err = generate_report(&CsvSource::new(dir.path()), &config).unwrap_err();
    assert!(matches!(
        err,
        ReportError::MissingColumn { ref table, ref column } if table == "italy" && column == "tier"
    ));
    assert!(!config.output_file.exists());
}
