//! arview のユースケース・配線テスト（フェイク実装を共有する）

mod catalog_tests;

use crate::ports::outbound::RecordPrompt;
use common::builder::RecordInputs;
use common::domain::{Dirs, ModelRecord, StoreDocument};
use common::error::Error;
use common::ports::outbound::{EnvResolver, Log, LogRecord, ModelStore};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// メモリ上の ModelStore（None は「ファイルが無い」）
pub(crate) struct MemoryModelStore {
    pub document: Mutex<Option<StoreDocument>>,
    pub fail_append: bool,
}

impl MemoryModelStore {
    pub fn with(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            fail_append: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            document: Mutex::new(None),
            fail_append: false,
        }
    }

    pub fn snapshot(&self) -> Option<StoreDocument> {
        self.document.lock().unwrap().clone()
    }
}

impl ModelStore for MemoryModelStore {
    fn load(&self) -> Result<StoreDocument, Error> {
        self.snapshot().ok_or_else(|| Error::missing_file("memory"))
    }

    fn append(&self, record: &ModelRecord) -> Result<(), Error> {
        if self.fail_append {
            return Err(Error::io_msg("disk full"));
        }
        let mut guard = self.document.lock().unwrap();
        let doc = guard.as_mut().ok_or_else(|| Error::missing_file("memory"))?;
        doc.upsert(record.clone());
        Ok(())
    }

    fn initialize(&self, document: &StoreDocument, force: bool) -> Result<bool, Error> {
        let mut guard = self.document.lock().unwrap();
        if guard.is_some() && !force {
            return Ok(false);
        }
        *guard = Some(document.clone());
        Ok(true)
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// 受け取ったレコードを保持する Log
#[derive(Default)]
pub(crate) struct RecordingLog {
    pub records: Mutex<Vec<LogRecord>>,
}

impl RecordingLog {
    pub fn messages(&self) -> Vec<String> {
        self.records.lock().unwrap().iter().map(|r| r.message.clone()).collect()
    }
}

impl Log for RecordingLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// 決められた答えを返す RecordPrompt
pub(crate) struct ScriptedPrompt {
    pub answer: Option<RecordInputs>,
    pub calls: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn answering(answer: Option<RecordInputs>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordPrompt for ScriptedPrompt {
    fn collect(&self, _seed: &RecordInputs) -> Result<Option<RecordInputs>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// 一時ディレクトリ配下を返す EnvResolver
pub(crate) struct FixedEnv {
    pub home: PathBuf,
    pub base_url: Option<String>,
    /// HOME が無い環境を再現する
    pub fail_dirs: bool,
}

impl EnvResolver for FixedEnv {
    fn resolve_dirs(&self) -> Result<Dirs, Error> {
        if self.fail_dirs {
            return Err(Error::env("HOME is not set"));
        }
        Ok(Dirs {
            config_dir: self.home.join("config"),
            state_dir: self.home.join("state"),
        })
    }

    fn models_path_from_env(&self) -> Option<PathBuf> {
        None
    }

    fn base_url_from_env(&self) -> Option<String> {
        self.base_url.clone()
    }
}

/// 入力の最小セット
pub(crate) fn chair_inputs() -> RecordInputs {
    RecordInputs {
        id: "chair".to_string(),
        name: "Chair".to_string(),
        description: "Oak chair".to_string(),
        client: "Acme".to_string(),
        src: "chair.glb".to_string(),
        ..RecordInputs::default()
    }
}
