//! Display strings for the two supported UI languages.

use crate::error::UnknownLocale;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    pub fn other(&self) -> Locale {
        match self {
            Locale::Zh => Locale::En,
            Locale::En => Locale::Zh,
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Locale::Zh),
            "en" => Ok(Locale::En),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

/// The role a display string plays, independent of its current text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    WindowTitle,
    MethodLabel,
    #[serde(rename = "send_btn")]
    SendButton,
    UrlPlaceholder,
    HeadersLabel,
    HeadersKey,
    HeadersValue,
    ParamsTab,
    ParamsPlaceholder,
    DataTab,
    DataPlaceholder,
    ResponseStatus,
    ResponseHeadersLabel,
    ResponseHeadersPlaceholder,
    ResponseContentLabel,
    ResponseContentPlaceholder,
    ErrorStatus,
    ErrorContent,
    #[serde(rename = "switch_btn")]
    SwitchButton,
}

impl Slot {
    pub const ALL: [Slot; 19] = [
        Slot::WindowTitle,
        Slot::MethodLabel,
        Slot::SendButton,
        Slot::UrlPlaceholder,
        Slot::HeadersLabel,
        Slot::HeadersKey,
        Slot::HeadersValue,
        Slot::ParamsTab,
        Slot::ParamsPlaceholder,
        Slot::DataTab,
        Slot::DataPlaceholder,
        Slot::ResponseStatus,
        Slot::ResponseHeadersLabel,
        Slot::ResponseHeadersPlaceholder,
        Slot::ResponseContentLabel,
        Slot::ResponseContentPlaceholder,
        Slot::ErrorStatus,
        Slot::ErrorContent,
        Slot::SwitchButton,
    ];
}

const ZH: [(Slot, &str); 19] = [
    (Slot::WindowTitle, "Requests GUI 客户端"),
    (Slot::MethodLabel, "方法:"),
    (Slot::SendButton, "发送请求"),
    (Slot::UrlPlaceholder, "输入 URL（如 https://httpbin.org/get）"),
    (Slot::HeadersLabel, "Headers (键值对，每行一个)"),
    (Slot::HeadersKey, "键"),
    (Slot::HeadersValue, "值"),
    (Slot::ParamsTab, "查询参数"),
    (Slot::ParamsPlaceholder, "输入查询参数（键=值&键=值，或 JSON）"),
    (Slot::DataTab, "请求体"),
    (Slot::DataPlaceholder, "输入请求体（文本或 JSON）"),
    (Slot::ResponseStatus, "状态码："),
    (Slot::ResponseHeadersLabel, "响应头："),
    (Slot::ResponseHeadersPlaceholder, "响应头..."),
    (Slot::ResponseContentLabel, "响应内容："),
    (Slot::ResponseContentPlaceholder, "响应内容..."),
    (Slot::ErrorStatus, "状态码：错误 - "),
    (Slot::ErrorContent, "错误信息："),
    (Slot::SwitchButton, "Switch Language"),
];

const EN: [(Slot, &str); 19] = [
    (Slot::WindowTitle, "Requests GUI Client"),
    (Slot::MethodLabel, "Method:"),
    (Slot::SendButton, "Send Request"),
    (Slot::UrlPlaceholder, "Enter URL (e.g., https://httpbin.org/get)"),
    (Slot::HeadersLabel, "Headers (Key-Value pairs, one per line)"),
    (Slot::HeadersKey, "Key"),
    (Slot::HeadersValue, "Value"),
    (Slot::ParamsTab, "Query Parameters"),
    (
        Slot::ParamsPlaceholder,
        "Enter query parameters (key=value&key=value, or JSON)",
    ),
    (Slot::DataTab, "Request Body"),
    (Slot::DataPlaceholder, "Enter request body (text or JSON)"),
    (Slot::ResponseStatus, "Status Code:"),
    (Slot::ResponseHeadersLabel, "Response Headers:"),
    (Slot::ResponseHeadersPlaceholder, "Response headers..."),
    (Slot::ResponseContentLabel, "Response Content:"),
    (Slot::ResponseContentPlaceholder, "Response content..."),
    (Slot::ErrorStatus, "Status Code: Error - "),
    (Slot::ErrorContent, "Error message:"),
    (Slot::SwitchButton, "切换语言"),
];

/// Per-locale overrides, keyed the same way as the built-in table.
pub type LabelOverrides = HashMap<Locale, HashMap<Slot, String>>;

/// Immutable slot → text table for every locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageTable {
    entries: HashMap<Locale, HashMap<Slot, String>>,
}

impl LanguageTable {
    pub fn builtin() -> Self {
        let build = |rows: &[(Slot, &str)]| {
            rows.iter()
                .map(|(slot, text)| (*slot, text.to_string()))
                .collect::<HashMap<_, _>>()
        };
        let mut entries = HashMap::new();
        entries.insert(Locale::Zh, build(&ZH));
        entries.insert(Locale::En, build(&EN));
        Self { entries }
    }

    /// Replace individual strings, leaving every other slot untouched.
    pub fn with_overrides(mut self, overrides: &LabelOverrides) -> Self {
        for (locale, slots) in overrides {
            let table = self.entries.entry(*locale).or_default();
            for (slot, text) in slots {
                table.insert(*slot, text.clone());
            }
        }
        self
    }

    pub fn get(&self, locale: Locale, slot: Slot) -> &str {
        self.entries
            .get(&locale)
            .and_then(|table| table.get(&slot))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Current UI language plus the table it reads from. Each shell owns one.
#[derive(Clone, Debug)]
pub struct LocaleState {
    table: Arc<LanguageTable>,
    current: Locale,
}

impl LocaleState {
    pub fn new(table: Arc<LanguageTable>, current: Locale) -> Self {
        Self { table, current }
    }

    pub fn get_locale(&self) -> Locale {
        self.current
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if self.current != locale {
            tracing::info!(from = self.current.tag(), to = locale.tag(), "switching language");
            self.current = locale;
        }
    }

    /// Flip to the other language and return it.
    pub fn toggle(&mut self) -> Locale {
        self.set_locale(self.current.other());
        self.current
    }

    pub fn text(&self, slot: Slot) -> &str {
        self.table.get(self.current, slot)
    }

    /// Every slot with its text in the current language.
    pub fn labels(&self) -> Vec<(Slot, String)> {
        Slot::ALL
            .iter()
            .map(|slot| (*slot, self.text(*slot).to_string()))
            .collect()
    }
}

impl Default for LocaleState {
    fn default() -> Self {
        Self::new(Arc::new(LanguageTable::builtin()), Locale::default())
    }
}
