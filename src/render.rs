use crate::error::BeautifyError;
use crate::locale::{Locale, LocaleState, Slot};
use crate::types::ResponseResult;

/// Display text for the three response panes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status_text: String,
    pub headers_text: String,
    pub body_text: String,
}

pub fn render(result: &ResponseResult, locale: &LocaleState) -> RenderedResponse {
    match result {
        ResponseResult::Failure { error } => RenderedResponse {
            status_text: format!("{}{}", locale.text(Slot::ErrorStatus), error),
            headers_text: String::new(),
            body_text: format!("{}{}", locale.text(Slot::ErrorContent), error),
        },
        ResponseResult::Success(response) => {
            let headers_text = response
                .headers
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n");

            // Attempted for every body, whatever its declared content type.
            let body_text = match beautify(&response.text) {
                Ok(pretty) => pretty,
                Err(_) => response.text.clone(),
            };

            RenderedResponse {
                status_text: format!(
                    "{}{}",
                    locale.text(Slot::ResponseStatus),
                    response.status_code
                ),
                headers_text,
                body_text,
            }
        }
    }
}

/// The last response together with its display text.
///
/// Rendering pretty-prints the whole body, so it happens once per response and
/// once per language switch, never per frame.
#[derive(Clone, Debug, Default)]
pub struct ResponseView {
    current: Option<(ResponseResult, Locale, RenderedResponse)>,
}

impl ResponseView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&mut self, result: ResponseResult, locale: &LocaleState) {
        let rendered = render(&result, locale);
        self.current = Some((result, locale.get_locale(), rendered));
    }

    /// Re-render for `locale` if the shown text belongs to another language.
    /// Returns whether anything was rendered.
    pub fn relocalize(&mut self, locale: &LocaleState) -> bool {
        match &mut self.current {
            Some((result, rendered_for, rendered)) if *rendered_for != locale.get_locale() => {
                *rendered = render(result, locale);
                *rendered_for = locale.get_locale();
                true
            }
            _ => false,
        }
    }

    pub fn result(&self) -> Option<&ResponseResult> {
        self.current.as_ref().map(|(result, _, _)| result)
    }

    pub fn rendered(&self) -> Option<&RenderedResponse> {
        self.current.as_ref().map(|(_, _, rendered)| rendered)
    }
}

/// Re-indent a structured (JSON) body for reading.
pub fn beautify(text: &str) -> Result<String, BeautifyError> {
    let value = serde_json::from_str::<serde_json::Value>(text)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
