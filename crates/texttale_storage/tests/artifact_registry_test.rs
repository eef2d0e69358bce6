//! Tests for the artifact registry and store.

use std::sync::Arc;
use tempfile::TempDir;
use texttale_storage::{ArtifactKind, ArtifactRegistry, ArtifactStore};

fn write(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"ID3").unwrap();
    path
}

#[tokio::test]
async fn test_persist_tracks_before_returning() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let store = ArtifactStore::new(registry.clone(), "/static/audio/");

    let artifact = store
        .persist(ArtifactKind::Speech, "woman", b"ID3 audio")
        .await
        .unwrap();

    assert!(artifact.path.exists());
    assert!(artifact.url.starts_with("/static/audio/speech_woman_"));
    assert!(artifact.url.ends_with(".mp3"));
    assert_eq!(registry.generated_count(), 1);
    assert_eq!(std::fs::read(&artifact.path).unwrap(), b"ID3 audio");
}

#[tokio::test]
async fn test_no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let store = ArtifactStore::new(registry, "/static/audio");

    store
        .persist(ArtifactKind::Background, "forest", b"ID3")
        .await
        .unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_cleanup_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let store = ArtifactStore::new(registry.clone(), "/static/audio");

    for voice in ["woman", "man", "child"] {
        store
            .persist(ArtifactKind::Speech, voice, b"ID3")
            .await
            .unwrap();
    }

    let first = registry.cleanup_generated();
    assert_eq!(first.removed, 3);
    assert!(first.failures.is_empty());

    let second = registry.cleanup_generated();
    assert_eq!(second.removed, 0);
    assert!(second.failures.is_empty());
}

#[test]
fn test_preexisting_files_survive_cleanup() {
    let dir = TempDir::new().unwrap();
    let old_speech = write(&dir, "speech_woman_1_deadbeef.mp3");
    let old_other = write(&dir, "theme.mp3");

    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    assert!(!registry.track(&old_speech));

    let report = registry.cleanup_generated();
    assert_eq!(report.removed, 0);
    assert!(old_speech.exists());
    assert!(old_other.exists());
}

#[test]
fn test_preexisting_partial_write_survives_cleanup() {
    let dir = TempDir::new().unwrap();
    let leftover = write(&dir, "speech_woman_1_deadbeef.tmp");

    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let report = registry.cleanup_generated();

    assert_eq!(report.removed, 0);
    assert!(leftover.exists());
}

#[test]
fn test_cleanup_skips_writes_in_progress() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();

    // A writer that has renamed its file but not yet committed it
    assert!(registry.reserve("speech_woman_9_feedface.mp3"));
    let renamed = write(&dir, "speech_woman_9_feedface.mp3");
    // and one still writing its temp file
    assert!(registry.reserve("background_rain_9_feedface.mp3"));
    let partial = write(&dir, "background_rain_9_feedface.tmp");

    let report = registry.cleanup_generated();
    assert_eq!(report.removed, 0);
    assert!(renamed.exists());
    assert!(partial.exists());

    assert!(registry.commit(&renamed));
    assert_eq!(registry.generated_count(), 1);
    registry.release("background_rain_9_feedface.mp3");

    let report = registry.cleanup_generated();
    assert_eq!(report.removed, 2);
    assert!(!renamed.exists());
    assert!(!partial.exists());
}

#[test]
fn test_commit_fails_when_file_vanished() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();

    assert!(registry.reserve("speech_child_3_0000beef.mp3"));
    let path = write(&dir, "speech_child_3_0000beef.mp3");
    registry.cleanup_all().unwrap();

    assert!(!registry.commit(&path));
    assert_eq!(registry.generated_count(), 0);
}

#[test]
fn test_untracked_stragglers_are_scanned() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();

    // Written after startup but never tracked
    let straggler = write(&dir, "background_rain_2_cafebabe.mp3");
    let partial = write(&dir, "speech_man_3_0badf00d.tmp");
    let unrelated = write(&dir, "notes.mp3");

    let report = registry.cleanup_generated();
    assert_eq!(report.removed, 2);
    assert!(!straggler.exists());
    assert!(!partial.exists());
    assert!(unrelated.exists());
}

#[test]
fn test_externally_deleted_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let path = write(&dir, "speech_child_4_12345678.mp3");
    assert!(registry.track(&path));

    std::fs::remove_file(&path).unwrap();

    let report = registry.cleanup_generated();
    assert_eq!(report.removed, 0);
    assert!(report.failures.is_empty());
}

#[test]
fn test_cleanup_all_removes_everything() {
    let dir = TempDir::new().unwrap();
    write(&dir, "speech_woman_1_deadbeef.mp3");
    write(&dir, "intro.mp3");
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let generated = write(&dir, "background_city_5_11111111.mp3");
    registry.track(&generated);
    let keep = write(&dir, "readme.txt");

    let report = registry.cleanup_all().unwrap();
    assert_eq!(report.removed, 3);
    assert_eq!(registry.generated_count(), 0);
    assert!(keep.exists());
}

#[test]
fn test_concurrent_tracking() {
    let dir = TempDir::new().unwrap();
    let registry = ArtifactRegistry::startup(dir.path()).unwrap();
    let paths: Vec<_> = (0..32)
        .map(|i| write(&dir, &format!("speech_woman_{i}_00000000.mp3")))
        .collect();

    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry.track(&path);
                registry.track(&path);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.generated_count(), 32);
    assert_eq!(registry.cleanup_generated().removed, 32);
}
