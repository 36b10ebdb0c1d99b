use super::path_error::PathError;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 走査対象として扱うファイル名の接尾辞 (大文字・小文字を区別する)。
pub const PNG_SUFFIX: &str = ".png";

// 構造体としてDirectoryPathを定義
#[derive(Debug)]
pub struct DirectoryPath {
    path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はディレクトリではありません。",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// 名前が `.png` で終わるエントリのパスを順に返します。
    ///
    /// `recursive` が `false` の場合は直下のエントリのみを対象とします。
    /// 出力順を安定させるため、各階層のエントリはファイル名順に並べます。
    /// 個々のエントリの読み取りエラーは `Err` として返すので、呼び出し側で走査を継続できます。
    pub fn png_candidates(
        &self,
        recursive: bool,
    ) -> impl Iterator<Item = Result<PathBuf, PathError>> {
        let max_depth = if recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if has_png_suffix(entry.file_name()) => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(PathError::Walk(e))),
            })
    }
}

/// ファイル名が `.png` で終わるかどうか。UTF-8 でない名前もバイト列で比較する。
pub fn has_png_suffix(name: &OsStr) -> bool {
    name.as_encoded_bytes().ends_with(PNG_SUFFIX.as_bytes())
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    // 外部クレートや親モジュールをuse
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// 正常なディレクトリパスでDirectoryPathが作成できるかテスト
    #[test]
    fn test_valid_directory_path() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        let result = DirectoryPath::new(path);
        assert!(result.is_ok());

        // 内部のパスと表示文字列が一致するか検証
        let dir_path_instance = result.unwrap();
        assert_eq!(dir_path_instance.as_path(), path);
        assert_eq!(dir_path_instance.to_string(), path.display().to_string());
    }

    /// 存在しないパスでエラーが返されるかテスト
    #[test]
    fn test_non_existent_path_returns_error() {
        let path = PathBuf::from("this_directory_should_not_exist");
        let result = DirectoryPath::new(&path);

        let err = result.unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("存在しません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    /// ファイルパスでエラーが返されるかテスト
    #[test]
    fn test_file_path_returns_error() {
        let file_path = PathBuf::from("Cargo.toml"); // 常に存在するファイル
        let result = DirectoryPath::new(&file_path);

        let err = result.unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("ディレクトリではありません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    #[test]
    fn test_has_png_suffix_is_case_sensitive() {
        assert!(has_png_suffix(OsStr::new("a.png")));
        assert!(has_png_suffix(OsStr::new("archive.tar.png")));
        assert!(!has_png_suffix(OsStr::new("a.PNG")));
        assert!(!has_png_suffix(OsStr::new("a.png.bak")));
        assert!(!has_png_suffix(OsStr::new("png")));
    }

    /// png_candidates()が直下の.pngエントリだけを名前順に返すかテスト
    #[test]
    fn test_png_candidates_top_level_only() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        fs::write(path.join("b.png"), "b").expect("Failed to create b.png");
        fs::write(path.join("a.png"), "a").expect("Failed to create a.png");
        fs::write(path.join("c.txt"), "c").expect("Failed to create c.txt");
        fs::write(path.join("D.PNG"), "d").expect("Failed to create D.PNG");
        fs::create_dir(path.join("nested")).expect("Failed to create subdir");
        fs::write(path.join("nested").join("e.png"), "e").expect("Failed to create e.png");

        let dir_path = DirectoryPath::new(path).unwrap();
        let names: Vec<String> = dir_path
            .png_candidates(false)
            .map(|res| res.expect("walk should not fail"))
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    /// recursive 指定時はサブディレクトリ内も対象になるかテスト
    #[test]
    fn test_png_candidates_recursive() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        fs::write(path.join("a.png"), "a").expect("Failed to create a.png");
        fs::create_dir_all(path.join("nested").join("deeper")).expect("Failed to create subdir");
        fs::write(path.join("nested").join("deeper").join("z.png"), "z")
            .expect("Failed to create z.png");

        let dir_path = DirectoryPath::new(path).unwrap();
        let mut found: Vec<PathBuf> = dir_path
            .png_candidates(true)
            .map(|res| res.expect("walk should not fail"))
            .map(|p| p.strip_prefix(path).unwrap().to_path_buf())
            .collect();
        found.sort();

        assert_eq!(
            found,
            vec![
                PathBuf::from("a.png"),
                Path::new("nested").join("deeper").join("z.png"),
            ]
        );
    }

    /// 名前が.pngで終わるディレクトリも候補として返されるかテスト
    #[test]
    fn test_png_candidates_includes_directory_named_png() {
        let dir = tempdir().expect("Failed to create temp directory");
        fs::create_dir(dir.path().join("folder.png")).expect("Failed to create subdir");

        let dir_path = DirectoryPath::new(dir.path()).unwrap();
        let count = dir_path.png_candidates(false).count();
        assert_eq!(count, 1);
    }
}
