//! ファイルシステム Outbound ポート
//!
//! モデルストア・ページ設定・QR 出力・ログはすべてこの trait 経由で書く。

use crate::error::Error;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    /// バイナリをそのまま書く（PNG 等）
    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<(), Error>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    /// 追記用に開く（無ければ作る）
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;

    fn write(&self, path: &Path, contents: &str) -> Result<(), Error> {
        self.write_bytes(path, contents.as_bytes())
    }

    /// 親ディレクトリを作る（相対パスのファイル名だけなら何もしない）
    fn ensure_parent(&self, path: &Path) -> Result<(), Error> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// `<path>.tmp` に書いてから置き換える。失敗時は一時ファイルを消す。
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), Error> {
        self.ensure_parent(path)?;
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);
        self.write(&tmp, contents)?;
        self.rename(&tmp, path).inspect_err(|_| {
            let _ = self.remove_file(&tmp);
        })
    }
}
