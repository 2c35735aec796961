use clap::{Parser, Subcommand, ValueEnum};
use spermvision_common::StaleResultPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spermvision")]
#[command(about = "SpermVision AI - 動画・画像の選択と模擬解析", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ファイルを1件選択して解析（種別チェックなし）
    Analyze {
        /// 動画または画像ファイル
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// ドロップと同じ規則で選択して解析（最初の動画・画像を採用）
    Drop {
        /// ドロップするファイル群
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// フォルダ内の動画・画像を一覧表示
    Scan {
        /// フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 設定の表示・変更
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 最小待機時間（ミリ秒）
        #[arg(long)]
        min_delay: Option<u64>,

        /// 最大待機時間（ミリ秒、この値は含まない）
        #[arg(long)]
        max_delay: Option<u64>,

        /// 失敗率 (0〜1)
        #[arg(long)]
        fail_rate: Option<f64>,

        /// 解析中に選択が変わった場合の扱い (apply/discard)
        #[arg(long)]
        stale_results: Option<StalePolicyArg>,
    },
}

/// 解析実行の共通オプション
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// 乱数シード（結果を再現する）
    #[arg(long)]
    pub seed: Option<u64>,

    /// 失敗率を上書き (0〜1)
    #[arg(long)]
    pub fail_rate: Option<f64>,

    /// 結果をJSONで標準出力へ
    #[arg(long)]
    pub json: bool,

    /// 結果JSONの保存先
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StalePolicyArg {
    Apply,
    Discard,
}

impl From<StalePolicyArg> for StaleResultPolicy {
    fn from(arg: StalePolicyArg) -> Self {
        match arg {
            StalePolicyArg::Apply => StaleResultPolicy::Apply,
            StalePolicyArg::Discard => StaleResultPolicy::Discard,
        }
    }
}
