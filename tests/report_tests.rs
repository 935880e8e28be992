mod test_harness;

use print_shop::config::ReportConfig;
use print_shop::report::{render, write_report};
use tempfile::TempDir;
use test_harness::scheduler_with;

#[test]
fn test_render_one_block_per_device() {
    let mut scheduler = scheduler_with(&[("A", 1, 10), ("B", 2, 20)], &[(1, 4), (2, 6)]);
    scheduler.assign_all();

    let text = render(&scheduler);
    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("Printer \"A\""));
    assert!(blocks[0].contains("[#1|4 pages|in process]"));
    assert!(blocks[1].starts_with("Printer \"B\""));
    assert!(blocks[1].contains("* Load: 6 pages"));
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_write_report_creates_named_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("reports");
    let config = ReportConfig::default()
        .with_directory(&out)
        .with_extension("rpt");

    let mut scheduler = scheduler_with(&[("Office", 3, 40)], &[(89751, 2)]);
    scheduler.assign_all();

    let path = write_report(&scheduler, &config).unwrap();
    assert_eq!(path.parent(), Some(out.as_path()));

    let name = path.file_name().unwrap().to_str().unwrap();
    // report-YYYY-MM-DD-HHMMSS-NN.rpt
    assert!(name.starts_with("report-"), "name was {name}");
    assert!(name.ends_with(".rpt"), "name was {name}");
    let stem = name.trim_start_matches("report-").trim_end_matches(".rpt");
    let parts: Vec<&str> = stem.split('-').collect();
    assert_eq!(parts.len(), 5, "name was {name}");
    assert_eq!(parts[0].len(), 4);
    assert_eq!(parts[3].len(), 6);
    assert_eq!(parts[4].len(), 2);
    assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, render(&scheduler));
    assert!(contents.contains("[#89751|2 pages|in process]"));
}

#[test]
fn test_write_report_for_empty_scheduler() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = ReportConfig::default().with_directory(dir.path());

    let scheduler = scheduler_with(&[], &[]);
    let path = write_report(&scheduler, &config).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), "");
}
