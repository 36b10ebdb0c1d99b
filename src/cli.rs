use clap::Parser;
use std::path::PathBuf;

/// ディレクトリ内のPNGファイルの寸法を、ヘッダだけを読んで一覧表示するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 走査対象のPNGファイルが含まれるフォルダのパス
    #[arg(required = true)]
    pub input_dir: PathBuf,

    /// サブフォルダも再帰的に走査する (オプション: デフォルトは直下のみ)
    #[arg(short, long)]
    pub recursive: bool,
}
