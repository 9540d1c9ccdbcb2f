use anyhow::Result;
use chrono::NaiveDateTime;
use pretty_assertions::assert_eq;

use super::*;

fn at(raw: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")?)
}

fn assert_stats(stats: DropStats, count: usize, total: u64, average: u64) {
    assert_eq!(stats.count, count);
    assert_eq!(stats.total, total);
    assert_eq!(stats.average, average);
}

#[test]
fn test_stats() -> Result<()> {
    let when = at("2024-05-01 12:00")?;
    let records = vec![
        DropRecord::new(when, 100),
        DropRecord::new(when, 200),
        DropRecord::new(when, 300),
    ];

    assert_stats(compute_stats(&records), 3, 600, 200);

    Ok(())
}

#[test]
fn test_stats_empty() {
    assert_stats(compute_stats(&[]), 0, 0, 0);
    assert_eq!(compute_stats(&[]), DropStats::default());
}

#[test]
fn test_stats_average_is_truncated() -> Result<()> {
    let when = at("2024-05-01 12:00")?;
    let records = vec![DropRecord::new(when, 1), DropRecord::new(when, 2)];

    assert_stats(compute_stats(&records), 2, 3, 1);

    Ok(())
}

#[test]
fn test_stats_display() -> Result<()> {
    let when = at("2024-05-01 12:00")?;
    let stats = compute_stats(&[DropRecord::new(when, 9_700_000), DropRecord::new(when, 9_000_000)]);

    assert_eq!(stats.total_display(), "18,700,000 gp");
    assert_eq!(stats.average_display(), "9,350,000 gp");

    Ok(())
}

#[test]
fn test_add_manual() -> Result<()> {
    let mut drop_log = DropLog::new();
    let record = drop_log.add_manual(at("2024-05-01 13:07")?, 9_700_000);

    assert_eq!(record, DropRecord::new(at("2024-05-01 13:07")?, 9_700_000));
    assert_eq!(drop_log.records(), &[record]);
    assert_stats(drop_log.stats(), 1, 9_700_000, 9_700_000);

    Ok(())
}

#[test]
fn test_import_appends_after_manual_entries() -> Result<()> {
    let mut drop_log = DropLog::new();
    drop_log.add_manual(at("2024-05-01 13:07")?, 100);

    let outcome = drop_log.import_text_at(
        "Vyrewatch Sentinel:\nImage\nBlood shard (9,700,000 coins)",
        at("2024-05-02 09:00")?,
    );

    assert_eq!(outcome.imported, 1);
    assert_eq!(drop_log.len(), 2);
    let prices: Vec<u64> = drop_log.iter().map(|record| record.price_gp).collect();
    assert_eq!(prices, vec![100, 9_700_000]);
    assert_eq!(drop_log.records()[1].when, at("2024-05-02 09:00")?);
    assert_stats(drop_log.stats(), 2, 9_700_100, 4_850_050);

    Ok(())
}

#[test]
fn test_import_nothing_leaves_log_untouched() -> Result<()> {
    let mut drop_log = DropLog::new();
    drop_log.add_manual(at("2024-05-01 13:07")?, 100);

    let outcome = drop_log.import_text("   \n");

    assert_eq!(outcome, ImportOutcome::default());
    assert_eq!(drop_log.len(), 1);

    Ok(())
}

#[test]
fn test_replace_and_clear() -> Result<()> {
    let mut drop_log = DropLog::new();
    drop_log.add_manual(at("2024-05-01 13:07")?, 100);

    let loaded = vec![
        DropRecord::new(at("2024-04-01 10:00")?, 1_000),
        DropRecord::new(at("2024-04-02 10:00")?, 3_000),
    ];
    drop_log.replace(loaded.clone());

    assert_eq!(drop_log.records(), loaded.as_slice());
    assert_stats(drop_log.stats(), 2, 4_000, 2_000);

    drop_log.clear();

    assert!(drop_log.is_empty());
    assert_stats(drop_log.stats(), 0, 0, 0);

    Ok(())
}
