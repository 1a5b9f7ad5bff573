pub mod catalog;
pub mod module;
pub mod pagination;

pub use catalog::CardCatalog;
pub use module::{Capabilities, CardModule, CardModuleError, DataRequest, DataResponse, WebhookReply};
pub use pagination::{paginate, parse_page, CardPage, PER_PAGE};
