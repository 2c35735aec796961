//! 選択 → プレビュー → 模擬解析 → 結果 の一連の流れを検証
//!
//! tokio の時間を停止した状態で実行するため、3〜5秒の待機は仮想時間で進む。

use spermvision::media::{self, DiskFile};
use spermvision::runner::AnalysisRunner;
use spermvision::screen::AnalysisScreen;
use spermvision_common::{
    Completion, MediaCategory, MockAnalyzer, Phase, PlaybackCommand, Severity, StaleResultPolicy,
};
use std::path::Path;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

fn write_file(dir: &Path, name: &str, size: usize) -> DiskFile {
    let path = dir.join(name);
    std::fs::write(&path, vec![0u8; size]).expect("ファイル作成失敗");
    media::load_file(&path).expect("読み込み失敗")
}

fn sample_video(dir: &TempDir) -> DiskFile {
    // 2.4 MB
    write_file(dir.path(), "sample.mp4", 2_516_582)
}

/// sample.mp4 を選んで解析するシナリオ
#[tokio::test(start_paused = true)]
async fn test_sample_video_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = sample_video(&dir);
    assert_eq!(file.size_label(), "2.40 MB");

    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    assert!(screen.browse(Some(file)));

    // 動画プレビューとコントロール
    let preview = screen.preview().current().expect("プレビューがない");
    assert_eq!(preview.kind(), MediaCategory::Video);
    let controls = screen.preview().controls(screen.session().is_analyzing()).unwrap();
    assert!(controls.enabled);
    assert!(!controls.playing);

    let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(42));
    let ticket = screen.trigger_analyze().expect("解析が開始されない");
    let started = tokio::time::Instant::now();
    let handle = runner.spawn(&ticket);

    // 解析中
    assert!(screen.session().is_analyzing());
    assert_eq!(screen.session().phase(), Phase::Analyzing);
    let controls = screen.preview().controls(screen.session().is_analyzing()).unwrap();
    assert!(!controls.enabled);
    assert!(screen.toggle_playback().is_none());
    assert!(screen.preview().show_overlay(screen.session().is_analyzing()));
    assert!(!screen.remove());

    let outcome = handle.await.expect("タスク失敗").expect("キャンセルされた");
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(3000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(5000), "elapsed {:?}", elapsed);

    assert_eq!(screen.complete(&ticket, outcome), Completion::Stored);

    // 完了後
    assert!(!screen.session().is_analyzing());
    assert_eq!(screen.session().phase(), Phase::Done);
    let result = screen.session().result().expect("結果がない").clone();

    let notifications = screen.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Success);
    assert_eq!(
        notifications[0].description,
        format!(
            "Detected {} sperm cells with {}% confidence.",
            result.sperm_count,
            result.confidence.unwrap()
        )
    );

    assert_eq!(screen.toggle_playback(), Some(PlaybackCommand::Play));
}

/// ファイル未選択で解析
#[test]
fn test_analyze_without_file() {
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);

    assert!(screen.trigger_analyze().is_none());
    assert!(!screen.session().is_analyzing());
    assert_eq!(screen.session().phase(), Phase::Idle);

    let notifications = screen.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "No file selected");
    assert_eq!(notifications[0].severity, Severity::Warning);
}

/// テキストのみのドロップは無視
#[test]
fn test_drop_text_only_is_ignored() {
    let dir = tempdir().unwrap();
    let image = write_file(dir.path(), "cells.png", 100);
    let image_id = image.id();
    let text = write_file(dir.path(), "notes.txt", 10);

    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    assert!(screen.browse(Some(image)));

    assert!(!screen.drop_files(vec![text]));
    assert_eq!(screen.session().selected().map(|f| f.id()), Some(image_id));
    assert!(screen.notifications().is_empty());
}

/// ドロップは最初の動画・画像を採用
#[test]
fn test_drop_picks_first_media() {
    let dir = tempdir().unwrap();
    let files = vec![
        write_file(dir.path(), "notes.txt", 10),
        write_file(dir.path(), "clip.avi", 10),
        write_file(dir.path(), "cells.png", 10),
    ];

    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    assert!(screen.drop_files(files));
    assert_eq!(screen.session().selected().map(|f| f.name()), Some("clip.avi"));
    assert_eq!(screen.preview().current().map(|p| p.kind()), Some(MediaCategory::Video));
}

/// 参照ダイアログは種別を問わない
#[test]
fn test_browse_accepts_any_file() {
    let dir = tempdir().unwrap();
    let text = write_file(dir.path(), "notes.txt", 10);

    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    assert!(screen.browse(Some(text)));
    assert_eq!(screen.session().phase(), Phase::Ready);
    // 動画以外は静止画プレビュー（コントロールなし）
    assert!(screen.preview().controls(false).is_none());
    assert!(!screen.browse(None));
}

/// 連続選択でプレビューハンドルがリークしない
#[test]
fn test_preview_handles_released() {
    let dir = tempdir().unwrap();
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    const N: usize = 6;

    for i in 0..N {
        let file = write_file(dir.path(), &format!("frame{}.jpg", i), 64);
        assert!(screen.browse(Some(file)));
        assert_eq!(screen.preview().live_handles(), 1);
        assert_eq!(screen.preview().backend().alive(), 1);
    }

    assert_eq!(screen.preview().backend().opened(), N);
    assert_eq!(screen.preview().backend().released(), N - 1);

    assert!(screen.remove());
    assert_eq!(screen.preview().backend().alive(), 0);
    assert_eq!(screen.session().phase(), Phase::Idle);

    let file = write_file(dir.path(), "last.png", 64);
    screen.browse(Some(file));
    screen.teardown();
    assert_eq!(screen.preview().backend().alive(), 0);
}

/// 新しい選択で結果が消える
#[tokio::test(start_paused = true)]
async fn test_new_selection_clears_result() {
    let dir = tempdir().unwrap();
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(1));

    screen.browse(Some(sample_video(&dir)));
    let ticket = screen.trigger_analyze().unwrap();
    let outcome = runner.spawn(&ticket).await.unwrap().unwrap();
    screen.complete(&ticket, outcome);
    assert!(screen.session().result().is_some());

    screen.browse(Some(write_file(dir.path(), "next.png", 10)));
    assert!(screen.session().result().is_none());
    assert_eq!(screen.session().phase(), Phase::Ready);
}

/// 解析中に別ファイルを選んでも解析は継続し、結果は反映される
#[tokio::test(start_paused = true)]
async fn test_selection_during_analysis_apply() {
    let dir = tempdir().unwrap();
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
    let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(5));

    screen.browse(Some(sample_video(&dir)));
    let ticket = screen.trigger_analyze().unwrap();
    let handle = runner.spawn(&ticket);

    let next = write_file(dir.path(), "other.png", 10);
    let next_id = next.id();
    assert!(screen.browse(Some(next)));
    assert_eq!(screen.session().selected().map(|f| f.id()), Some(next_id));
    assert_eq!(screen.preview().current().map(|p| p.kind()), Some(MediaCategory::Image));
    assert!(screen.session().is_analyzing());

    let outcome = handle.await.unwrap().expect("キャンセルされないこと");
    assert_eq!(screen.complete(&ticket, outcome), Completion::Stored);
    assert!(screen.session().result().is_some());
}

/// discard ポリシーでは選択変更で解析がキャンセルされる
#[tokio::test(start_paused = true)]
async fn test_selection_during_analysis_discard() {
    let dir = tempdir().unwrap();
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Discard);
    let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(5));

    screen.browse(Some(sample_video(&dir)));
    let ticket = screen.trigger_analyze().unwrap();
    let handle = runner.spawn(&ticket);

    screen.browse(Some(write_file(dir.path(), "other.png", 10)));
    assert!(!screen.session().is_analyzing());

    let output = handle.await.unwrap();
    assert!(output.is_none());
    assert!(screen.session().result().is_none());
    assert!(screen.notifications().is_empty());
}

/// 失敗時は Ready に戻り、エラー通知
#[tokio::test(start_paused = true)]
async fn test_failure_path() {
    let dir = tempdir().unwrap();
    let analyzer = MockAnalyzer::new().with_failure_rate(1.0).unwrap();
    let mut runner = AnalysisRunner::new(analyzer, Some(9));
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);

    screen.browse(Some(sample_video(&dir)));
    let ticket = screen.trigger_analyze().unwrap();
    let outcome = runner.spawn(&ticket).await.unwrap().unwrap();

    assert_eq!(screen.complete(&ticket, outcome), Completion::Failed);
    assert_eq!(screen.session().phase(), Phase::Ready);
    assert!(screen.session().result().is_none());
    assert_eq!(screen.notifications()[0].title, "Analysis failed");
    assert_eq!(screen.notifications()[0].severity, Severity::Error);

    // 再試行できる
    assert!(screen.trigger_analyze().is_some());
}

/// 明示的なキャンセル
#[tokio::test(start_paused = true)]
async fn test_explicit_cancel() {
    let dir = tempdir().unwrap();
    let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(3));
    let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);

    screen.browse(Some(sample_video(&dir)));
    let ticket = screen.trigger_analyze().unwrap();
    let handle = runner.spawn(&ticket);

    assert!(screen.cancel_analysis());
    assert!(handle.await.unwrap().is_none());
    assert_eq!(screen.session().phase(), Phase::Ready);
}

/// 同じシードなら同じ結果
#[tokio::test(start_paused = true)]
async fn test_seeded_runs_repeat() {
    let dir = tempdir().unwrap();
    let mut results = Vec::new();

    for _ in 0..2 {
        let mut runner = AnalysisRunner::new(MockAnalyzer::new(), Some(2024));
        let mut screen = AnalysisScreen::new(StaleResultPolicy::Apply);
        screen.browse(Some(sample_video(&dir)));
        let ticket = screen.trigger_analyze().unwrap();
        let outcome = runner.spawn(&ticket).await.unwrap().unwrap();
        screen.complete(&ticket, outcome);
        results.push(screen.session().result().cloned().unwrap());
    }

    assert_eq!(results[0], results[1]);
}
