use std::path::PathBuf;

use chrono::NaiveDate;
use logsweep_core::{
    ArchiveResult, Candidate, Compression, Cutoff, Group, GroupKey, GroupingMode, RunConfig,
    RunStatus, RunSummary,
};

#[test]
fn test_config_builder_defaults() {
    let config = RunConfig::builder()
        .input_dir("/var/log/app")
        .output_dir("/archive")
        .mode(GroupingMode::ByMonth {
            cutoff: Some(Cutoff::AgeDays(90)),
        })
        .build()
        .unwrap();

    assert_eq!(config.compression, Compression::Balanced);
    assert!(!config.delete_after_archive);
    assert!(!config.create_output_dir);
    assert_eq!(config.extension, "log");
}

#[test]
fn test_config_roundtrips_through_serde() {
    let config = RunConfig::builder()
        .input_dir("/logs")
        .output_dir("/out")
        .mode(GroupingMode::ByPattern {
            patterns: vec!["2024_08*".to_string()],
        })
        .compression(Compression::Maximum)
        .delete_after_archive(true)
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let back: RunConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(back.input_dir, PathBuf::from("/logs"));
    assert_eq!(back.compression, Compression::Maximum);
    assert!(back.delete_after_archive);
}

#[test]
fn test_group_membership_and_eligibility() {
    let mut group = Group::new(GroupKey::month(2024, 8));
    assert!(!group.is_eligible());

    let date = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
    group.members.push(Candidate::dated(
        "/logs/2024_08_03.log",
        "2024_08_03.log",
        date,
        std::time::SystemTime::now(),
        256,
    ));
    group.members.push(Candidate::dated(
        "/logs/2024_08_04.log",
        "2024_08_04.log",
        date.succ_opt().unwrap(),
        std::time::SystemTime::now(),
        512,
    ));

    assert!(group.is_eligible());
    assert_eq!(group.len(), 2);
    assert_eq!(group.total_bytes(), 768);
}

#[test]
fn test_summary_aggregation_over_mixed_results() {
    let mut summary = RunSummary::default();

    summary.record(&ArchiveResult {
        key: GroupKey::month(2024, 1),
        archive_path: PathBuf::from("/out/2024-01.zip"),
        files_written: 2,
        bytes_written: 1024,
        succeeded: true,
        error: None,
    });
    summary.record(&ArchiveResult {
        key: GroupKey::month(2024, 2),
        archive_path: PathBuf::from("/out/2024-02.zip"),
        files_written: 1,
        bytes_written: 0,
        succeeded: false,
        error: Some(logsweep_core::ArchiveError::new(
            "/logs/2024_02_01.log",
            "disk full",
        )),
    });

    assert_eq!(summary.groups_attempted, 2);
    assert_eq!(summary.groups_succeeded, 1);
    assert_eq!(summary.groups_failed, 1);
    assert_eq!(summary.files_archived, 2);
    assert_eq!(summary.bytes_archived, 1024);
    assert_eq!(summary.status(), RunStatus::PartialFailure);
}

#[test]
fn test_pattern_key_is_archive_base_name() {
    let key = GroupKey::from_pattern("2024_08_01*");
    assert_eq!(key.as_str(), "2024_08_01");
    assert_eq!(format!("{key}.zip"), "2024_08_01.zip");
}
