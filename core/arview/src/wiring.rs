//! 配線: 標準アダプタで UseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{FileJsonLog, JsonModelStore, NoopLog, StdEnvResolver, StdFileSystem, UnresolvedModelStore};
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel, ModelStore};

use crate::adapter::{CliRecordPrompt, QrcodeEncoder};
use crate::ports::outbound::{QrEncoder, RecordPrompt};
use crate::usecase::{AddModelUseCase, CatalogUseCase, ExportQrUseCase, InitUseCase, PageConfigUseCase};

/// CLI で上書きできる配線パラメータ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringOptions {
    /// -m / --models
    pub models_path: Option<PathBuf>,
    /// --base-url
    pub base_url: Option<String>,
    /// -v / --verbose
    pub verbose: bool,
}

/// 配線で組み立てたユースケース群（main の Command ディスパッチで利用）
pub struct App {
    pub logger: Arc<dyn Log>,
    pub catalog_use_case: Arc<CatalogUseCase>,
    pub add_model_use_case: AddModelUseCase,
    pub export_qr_use_case: ExportQrUseCase,
    pub init_use_case: InitUseCase,
    pub page_config_use_case: PageConfigUseCase,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_arview(options: &WiringOptions) -> App {
    let env_resolver: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    wire_with(options, env_resolver)
}

/// EnvResolver を差し替えられる配線（テスト用にも使う）
///
/// ディレクトリが解決できなくても失敗しない。ログは NoopLog になり、
/// config 配下のパスを必要とする処理だけが解決時のエラーを返す。
pub fn wire_with(options: &WiringOptions, env_resolver: Arc<dyn EnvResolver>) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let dirs = env_resolver.resolve_dirs();

    let min_level = if options.verbose { LogLevel::Debug } else { LogLevel::Info };
    let logger: Arc<dyn Log> = match &dirs {
        Ok(d) => Arc::new(FileJsonLog::new(Arc::clone(&fs), d.log_file_path()).with_min_level(min_level)),
        Err(_) => Arc::new(NoopLog),
    };

    let models_path = match options.models_path.clone().or_else(|| env_resolver.models_path_from_env()) {
        Some(path) => Ok(path),
        None => dirs.as_ref().map(|d| d.models_path()).map_err(|e| e.clone()),
    };
    let store: Arc<dyn ModelStore> = match models_path {
        Ok(path) => Arc::new(JsonModelStore::new(Arc::clone(&fs), path)),
        Err(reason) => Arc::new(UnresolvedModelStore::new(reason)),
    };
    let ar_config_path = dirs.as_ref().ok().map(|d| d.ar_config_path());
    let base_url = options.base_url.clone().or_else(|| env_resolver.base_url_from_env());

    let catalog_use_case = Arc::new(CatalogUseCase::new(
        Arc::clone(&store),
        Arc::clone(&logger),
        base_url,
    ));
    let prompt: Arc<dyn RecordPrompt> = Arc::new(CliRecordPrompt);
    let encoder: Arc<dyn QrEncoder> = Arc::new(QrcodeEncoder);

    App {
        add_model_use_case: AddModelUseCase::new(
            Arc::clone(&catalog_use_case),
            Arc::clone(&store),
            prompt,
            Arc::clone(&logger),
        ),
        export_qr_use_case: ExportQrUseCase::new(encoder, Arc::clone(&fs), Arc::clone(&logger)),
        init_use_case: InitUseCase::new(Arc::clone(&store), Arc::clone(&fs), ar_config_path.clone()),
        page_config_use_case: PageConfigUseCase::new(Arc::clone(&fs), ar_config_path),
        catalog_use_case,
        logger,
    }
}
