use responsive_config::{
    Breakpoint, CacheStrategy, PerformanceConfig, ResponsiveConfig, ResponsiveConfigBuilder,
    ScalingToken,
};
use responsive_engine::{
    CacheError, FileStore, PersistedRecord, PersistedStore, ScalingEngine, StrategyRegistry,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn persisted_config(scale: f64) -> ResponsiveConfig {
    ResponsiveConfigBuilder::new()
        .breakpoint(Breakpoint::new("Mobile", "mobile", 390.0, 844.0))
        .breakpoint(Breakpoint::new("Desktop", "desktop", 1920.0, 1080.0))
        .base("desktop")
        .token("spacing", ScalingToken::new(scale))
        .performance(PerformanceConfig {
            cache_strategy: CacheStrategy::Persisted,
            ..PerformanceConfig::default()
        })
        .build()
        .expect("valid config")
}

fn snapshot_records(dir: &TempDir) -> Vec<PersistedRecord> {
    let entry = fs::read_dir(dir.path())
        .expect("cache dir")
        .filter_map(Result::ok)
        .find(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .expect("snapshot file");
    let json = fs::read_to_string(entry.path()).expect("read snapshot");
    serde_json::from_str(&json).expect("records")
}

#[test]
fn file_store_reuses_values_across_sessions() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let first = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(FileStore::new(temp.path())),
    )?;
    let value = first.value(32.0, "spacing", "mobile")?;
    assert_eq!(first.cache_stats().misses, 1);
    first.flush_cache();

    let records = snapshot_records(&temp);
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].key,
        ("spacing".to_string(), 32.0, "mobile".to_string(), 0)
    );
    assert_eq!(records[0].value, value);

    let second = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(FileStore::new(temp.path())),
    )?;
    assert_eq!(second.cache_stats().size, 1);
    assert_eq!(second.value(32.0, "spacing", "mobile")?, value);
    assert_eq!(second.cache_stats().hits, 1);
    Ok(())
}

#[test]
fn different_config_does_not_see_old_entries() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let first = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(FileStore::new(temp.path())),
    )?;
    first.value(32.0, "spacing", "mobile")?;
    drop(first);

    let changed = ScalingEngine::with_persisted_store(
        persisted_config(0.5),
        StrategyRegistry::new(),
        Box::new(FileStore::new(temp.path())),
    )?;
    assert_eq!(changed.cache_stats().size, 0);
    Ok(())
}

#[test]
fn config_replacement_writes_new_version() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let mut engine = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(FileStore::new(temp.path().join("a"))),
    )?;
    engine.value(32.0, "spacing", "mobile")?;

    engine.replace_config(persisted_config(0.5))?;
    engine.value(32.0, "spacing", "mobile")?;
    engine.flush_cache();

    let files: Vec<_> = fs::read_dir(temp.path().join("a"))?
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(files.len(), 2, "one snapshot per config fingerprint");

    for file in files {
        let records: Vec<PersistedRecord> =
            serde_json::from_str(&fs::read_to_string(file.path())?)?;
        assert_eq!(records.len(), 1);
    }
    Ok(())
}

struct ReadOnlyStore;

impl PersistedStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn failing_writes_degrade_to_memory() -> anyhow::Result<()> {
    let engine = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(ReadOnlyStore),
    )?;
    assert!(!engine.is_cache_degraded());

    engine.value(32.0, "spacing", "mobile")?;
    engine.flush_cache();
    assert!(engine.is_cache_degraded());

    engine.value(32.0, "spacing", "mobile")?;
    assert_eq!(engine.cache_stats().hits, 1);
    Ok(())
}

#[derive(Clone, Default)]
struct CountingStore {
    writes: Arc<AtomicUsize>,
    bytes: Arc<AtomicUsize>,
}

impl PersistedStore for CountingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, value: &str) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.bytes.fetch_add(value.len(), Ordering::SeqCst);
        Ok(())
    }
}

#[test]
fn lookups_never_write_the_snapshot() -> anyhow::Result<()> {
    let store = CountingStore::default();
    let engine = ScalingEngine::with_persisted_store(
        persisted_config(1.0),
        StrategyRegistry::new(),
        Box::new(store.clone()),
    )?;

    for i in 0..1000 {
        engine.value(f64::from(i), "spacing", "mobile")?;
    }
    assert_eq!(engine.cache_stats().misses, 1000);
    assert_eq!(store.writes.load(Ordering::SeqCst), 0);

    engine.flush_cache();
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    let one_snapshot = store.bytes.load(Ordering::SeqCst);

    drop(engine);
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    assert_eq!(store.bytes.load(Ordering::SeqCst), one_snapshot);
    Ok(())
}
