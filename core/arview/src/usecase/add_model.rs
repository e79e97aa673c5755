//! 新規モデルの追加（arview add-model）
//!
//! 順序: ストア読込 → 入力収集 → build → レジストリへ add（メモリ）→ ストアへ追記。
//! 追記に失敗してもメモリ上のレジストリは add 済みの状態のまま壊れない。

use crate::domain::AddModelArgs;
use crate::ports::outbound::RecordPrompt;
use crate::usecase::CatalogUseCase;
use common::builder;
use common::domain::EffectiveConfig;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord, ModelStore};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum AddModelOutcome {
    Added {
        effective: EffectiveConfig,
        url: String,
        /// 同じ ID のレコードを置き換えた
        replaced: bool,
    },
    /// 対話で取り消された（何も書かない）
    Cancelled,
}

pub struct AddModelUseCase {
    catalog: Arc<CatalogUseCase>,
    store: Arc<dyn ModelStore>,
    prompt: Arc<dyn RecordPrompt>,
    logger: Arc<dyn Log>,
}

impl AddModelUseCase {
    pub fn new(
        catalog: Arc<CatalogUseCase>,
        store: Arc<dyn ModelStore>,
        prompt: Arc<dyn RecordPrompt>,
        logger: Arc<dyn Log>,
    ) -> Self {
        Self {
            catalog,
            store,
            prompt,
            logger,
        }
    }

    pub fn run(&self, args: &AddModelArgs) -> Result<AddModelOutcome, Error> {
        // 入力を集める前にストアの有無を確かめる
        let mut catalog = self.catalog.load()?;

        let inputs = if args.assume_yes {
            args.inputs.clone()
        } else {
            match self.prompt.collect(&args.inputs)? {
                Some(inputs) => inputs,
                None => return Ok(AddModelOutcome::Cancelled),
            }
        };

        let record = builder::build(&inputs)?;
        let replaced = catalog.registry.contains(&record.id);
        let effective = catalog.registry.add(record.clone())?;
        self.store.append(&record)?;

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "model added")
                .layer("usecase")
                .kind("store")
                .field("id", record.id.to_string())
                .field("replaced", replaced)
                .field("store", self.store.location()),
        );

        let url = catalog.registry.model_url(&record.id, &catalog.base_url);
        Ok(AddModelOutcome::Added {
            effective,
            url,
            replaced,
        })
    }
}
