pub mod config;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod locale;
pub mod params;
pub mod render;
pub mod request;
pub mod types;

pub use config::AppConfig;
pub use dispatch::{Completion, Dispatcher, PendingRequest, RequestId, RequestTracker};
pub use error::TransportError;
pub use headers::{collect_headers, CaseInsensitiveHeaders, HeaderRow};
pub use locale::{LanguageTable, Locale, LocaleState, Slot};
pub use params::{parse_params, query_pairs, Params};
pub use render::{render, RenderedResponse, ResponseView};
pub use request::{HttpTransport, ReqwestTransport};
pub use types::{HttpMethod, HttpResponse, RequestSpec, RequestTab, ResponseResult};
