use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use spermvision::{cli, config, error, media, report, runner, screen};
use cli::{Cli, Commands, RunArgs};
use config::Config;
use error::Result;
use report::AnalysisReport;
use runner::AnalysisRunner;
use screen::AnalysisScreen;
use spermvision_common::{selector, MediaCategory, SUPPORTED_FORMATS};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, run } => {
            println!("🔬 SpermVision AI - 解析\n");

            let selected = media::load_file(&file)?;
            let mut screen = AnalysisScreen::new(config.stale_results);
            screen.browse(Some(selected));

            run_analysis(&mut screen, &config, &run).await?;
        }

        Commands::Drop { files, run } => {
            println!("🔬 SpermVision AI - ドロップ解析\n");

            let mut dropped = Vec::new();
            for path in &files {
                match media::load_file(path) {
                    Ok(file) => dropped.push(file),
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "dropped entry skipped"
                    ),
                }
            }

            let mut screen = AnalysisScreen::new(config.stale_results);
            if !screen.drop_files(dropped) {
                println!("動画・画像ファイルが含まれていないため、選択は変更されません");
                println!("対応形式: {}", SUPPORTED_FORMATS);
                return Ok(());
            }

            run_analysis(&mut screen, &config, &run).await?;
        }

        Commands::Scan { folder, recursive } => {
            println!("📂 SpermVision AI - スキャン\n");

            let files = media::scan_folder(&folder, recursive)?;
            if files.is_empty() {
                println!("動画・画像ファイルが見つかりません: {}", folder.display());
                return Ok(());
            }

            for file in &files {
                println!(
                    "  {} {:<40} {:>10}  {}",
                    category_icon(selector::file_icon_kind(file)),
                    file.name(),
                    file.size_label(),
                    file.mime_type()
                );
            }
            println!("\n✔ {}件のファイルを検出", files.len());
        }

        Commands::Config { show, min_delay, max_delay, fail_rate, stale_results } => {
            let mut config = config;
            let changed = min_delay.is_some()
                || max_delay.is_some()
                || fail_rate.is_some()
                || stale_results.is_some();

            if let Some(ms) = min_delay {
                config.min_delay_ms = ms;
            }
            if let Some(ms) = max_delay {
                config.max_delay_ms = ms;
            }
            if let Some(rate) = fail_rate {
                config.failure_rate = rate;
            }
            if let Some(policy) = stale_results {
                config.stale_results = policy.into();
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  待機時間: {}〜{} ms", config.min_delay_ms, config.max_delay_ms);
                println!("  失敗率: {}", config.failure_rate);
                println!("  解析中の選択変更: {}", config.stale_results.as_str());
                println!(
                    "  シード: {}",
                    config.seed.map(|s| s.to_string()).unwrap_or_else(|| "未設定".to_string())
                );
                if let Some(seed) = Config::env_seed() {
                    println!("  シード（{}で上書き中）: {}", config::SEED_ENV, seed);
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn category_icon(category: MediaCategory) -> &'static str {
    match category {
        MediaCategory::Video => "🎞",
        MediaCategory::Image => "🖼",
    }
}

/// 選択済みの画面で模擬解析を1回実行して結果を表示
async fn run_analysis(screen: &mut AnalysisScreen, config: &Config, run: &RunArgs) -> Result<()> {
    if let Some(file) = screen.session().selected() {
        println!(
            "{} {} ({})",
            category_icon(selector::file_icon_kind(file)),
            file.name(),
            file.size_label()
        );
        if file.category().is_none() {
            println!("  ※ 動画・画像として認識できない形式です（静止画として扱います）");
        }
    }
    if let Some(controls) = screen.preview().controls(screen.session().is_analyzing()) {
        println!("  再生コントロール: {}", if controls.enabled { "有効" } else { "無効" });
    }

    let mut analyzer = config.analyzer()?;
    if let Some(rate) = run.fail_rate {
        analyzer = analyzer.with_failure_rate(rate)?;
    }
    let mut runner = AnalysisRunner::new(analyzer, run.seed.or_else(|| config.effective_seed()));

    let Some(ticket) = screen.trigger_analyze() else {
        print_notifications(screen);
        return Ok(());
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing frames...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = runner.spawn(&ticket).await;
    spinner.finish_and_clear();

    match output? {
        Some(outcome) => {
            screen.complete(&ticket, outcome);
        }
        None => println!("解析はキャンセルされました"),
    }
    print_notifications(screen);

    if let (Some(file), Some(result)) = (screen.session().selected(), screen.session().result()) {
        println!("\n解析結果:");
        for line in report::format_result(result) {
            println!("{}", line);
        }

        let report = AnalysisReport::new(file, result.clone());
        if run.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        if let Some(output) = &run.output {
            report.save(output)?;
            println!("✔ 結果を保存: {}", output.display());
        }
    }

    screen.teardown();
    Ok(())
}

fn print_notifications(screen: &mut AnalysisScreen) {
    for notification in screen.take_notifications() {
        println!("{}", report::format_notification(&notification));
    }
}
