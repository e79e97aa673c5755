//! アダプター（外界の I/O を ports の trait で実装する）
//!
//! usecase はこのモジュールの型を直接使わず、wiring で trait object として注入する。

pub mod file_json_log;
pub mod json_model_store;
pub mod std_env_resolver;
pub mod std_fs;
pub mod unresolved_model_store;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use json_model_store::JsonModelStore;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use unresolved_model_store::UnresolvedModelStore;
