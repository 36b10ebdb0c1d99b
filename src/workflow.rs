//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! ディレクトリ走査とPNG寸法の出力フローを実装します。

use crate::cli::Args;
use png_dimensions::domain::input_source::path_error::PathError;
use png_dimensions::domain::{png_header, DirectoryPath, HeaderProbe, ImageDimensions};
use png_dimensions::error::AppError;
use std::io::{self, Write};
use std::path::Path;

/// 1回の走査で集計した件数。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// 寸法を出力したファイル数
    pub reported: usize,
    /// PNGとして解釈できずスキップしたファイル数
    pub not_png: usize,
    /// 開けない・読めなかったエントリ数
    pub failed: usize,
}

// --- public なエントリポイント ---

/// アプリケーションのメインロジックを実行します。
///
/// # 引数
/// * `args`: コマンドラインからパースされた引数 (`cli::Args`)。
///
/// # 戻り値
/// * `Ok(())`: 走査が最後まで完了した場合 (個別ファイルの失敗は含まない)。
/// * `Err(AppError)`: 入力ディレクトリが無効・列挙できない、または出力に失敗した場合。
pub fn run(args: Args) -> Result<(), AppError> {
    // DirectoryPath::new を使うことで、パスが存在し、かつディレクトリであることが保証される。
    let input_dir = DirectoryPath::new(&args.input_dir)?;
    log::info!("走査を開始します: {}", input_dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = scan_directory(&input_dir, args.recursive, &mut out)?;
    out.flush()?;

    log::info!(
        "完了: 出力 {} 件 / PNG以外 {} 件 / 失敗 {} 件",
        summary.reported,
        summary.not_png,
        summary.failed
    );
    Ok(())
}

/// ディレクトリ内の `.png` ファイルを走査し、`<名前>: <幅>x<高さ>` を `out` に1行ずつ書き出します。
///
/// 個々のファイルやサブディレクトリの失敗は警告ログを出して次へ進みます。
/// 入力ディレクトリ自体を列挙できない場合と、`out` への書き込みに失敗した場合はエラーを返します。
pub fn scan_directory<W: Write>(
    input_dir: &DirectoryPath,
    recursive: bool,
    out: &mut W,
) -> Result<ScanSummary, AppError> {
    let mut summary = ScanSummary::default();

    for candidate in input_dir.png_candidates(recursive) {
        let path = match candidate {
            Ok(path) => path,
            // 深さ 0 のエラーは入力ディレクトリそのものが読めないことを表す
            Err(PathError::Walk(e)) if e.depth() == 0 => {
                return Err(PathError::Walk(e).into());
            }
            Err(e) => {
                log::warn!("エントリを読み取れませんでした: {}", e);
                summary.failed += 1;
                continue;
            }
        };

        match png_header::read_header(&path) {
            Ok(HeaderProbe::Dimensions(dims)) => {
                write_line(out, &display_name(input_dir.as_path(), &path), dims)?;
                summary.reported += 1;
            }
            Ok(HeaderProbe::NotPng(reason)) => {
                log::debug!("スキップ: {} ({})", path.display(), reason);
                summary.not_png += 1;
            }
            Err(e) => {
                // 1つのファイルが読めなくても走査全体は止めない
                log::warn!("'{}' を読み取れませんでした: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

// --- private なヘルパー関数 ---

/// `<名前>: <幅>x<高さ>` を1行書き出す。
fn write_line<W: Write>(out: &mut W, name: &str, dims: ImageDimensions) -> io::Result<()> {
    writeln!(out, "{}: {}", name, dims)
}

/// 入力ディレクトリからの相対パスを表示名とする。直下のファイルならファイル名そのもの。
fn display_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
