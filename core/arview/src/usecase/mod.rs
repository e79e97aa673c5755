pub(crate) mod add_model;
pub(crate) mod catalog;
pub(crate) mod export_qr;
pub(crate) mod init;
pub(crate) mod page_config;

pub(crate) use add_model::{AddModelOutcome, AddModelUseCase};
pub(crate) use catalog::CatalogUseCase;
pub(crate) use export_qr::{ExportQrUseCase, ExportResult};
pub(crate) use init::InitUseCase;
pub(crate) use page_config::PageConfigUseCase;
