//! PNGファイルの先頭バイトから画像の寸法を読み取るモジュール。
//!
//! PNGファイルは8バイトのシグネチャの直後に IHDR チャンクが続き、
//! その長さ(4バイト)と種別(4バイト)の後に幅と高さがビッグエンディアンで格納されています。
//! そのため、先頭24バイトだけを読めば画像全体をデコードせずに寸法を取得できます。

use super::image_dimensions::ImageDimensions;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// PNGシグネチャ `89 50 4E 47 0D 0A 1A 0A`。
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// 寸法の取得に必要なヘッダのバイト数 (シグネチャ + IHDR の長さ・種別 + 幅 + 高さ)。
pub const HEADER_LEN: usize = 24;

const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;

/// ヘッダを読み取った結果。
///
/// ファイルを開けない・読めない場合はこの型ではなく `io::Error` として返されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProbe {
    /// 有効なPNGヘッダから取得した寸法。
    Dimensions(ImageDimensions),
    /// 内容がPNGヘッダとして解釈できなかった。
    NotPng(NotPngReason),
}

/// PNGとして扱わなかった理由。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotPngReason {
    /// ヘッダに必要なバイト数に満たない。`len` は実際に読めたバイト数。
    TooShort { len: usize },
    /// 先頭8バイトがPNGシグネチャと一致しない。
    SignatureMismatch,
}

impl fmt::Display for NotPngReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotPngReason::TooShort { len } => write!(
                f,
                "ファイルが短すぎます ({} バイト、{} バイト以上必要)",
                len, HEADER_LEN
            ),
            NotPngReason::SignatureMismatch => write!(f, "PNGシグネチャが一致しません"),
        }
    }
}

/// メモリ上のバイト列からPNGヘッダを解釈します。
///
/// 長さの検査をシグネチャの検査より先に行います。
/// `HEADER_LEN` を超える部分は無視されます。
pub fn parse_header(bytes: &[u8]) -> HeaderProbe {
    if bytes.len() < HEADER_LEN {
        return HeaderProbe::NotPng(NotPngReason::TooShort { len: bytes.len() });
    }
    if bytes[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return HeaderProbe::NotPng(NotPngReason::SignatureMismatch);
    }

    let width = read_be_u32(bytes, WIDTH_OFFSET);
    let height = read_be_u32(bytes, HEIGHT_OFFSET);
    HeaderProbe::Dimensions(ImageDimensions::new(width, height))
}

/// ファイルの先頭 `HEADER_LEN` バイトだけを読み取り、PNGヘッダを解釈します。
///
/// # 戻り値
/// * `Ok(HeaderProbe)`: 読み取りに成功した場合 (PNGでなかった場合も含む)。
/// * `Err(io::Error)`: ファイルを開けない、または読み取りに失敗した場合。
///   ディレクトリを指すパスもここに含まれます。
pub fn read_header<P: AsRef<Path>>(path: P) -> io::Result<HeaderProbe> {
    let file = File::open(path.as_ref())?;

    // `take` で上限を設けることで、大きなファイルでも余分に読み込まない
    let mut buffer = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut buffer)?;

    Ok(parse_header(&buffer))
}

#[inline]
fn read_be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
