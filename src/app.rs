use gpui::*;
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::input::{Input, InputState};
use gpui_component::scroll::Scrollbar;
use gpui_component::tab::{Tab, TabBar};
use gpui_component::*;
use requests_gui::{
    collect_headers, parse_params, Completion, Dispatcher, HeaderRow, HttpMethod,
    LocaleState, RequestSpec, RequestTab, RequestTracker, ResponseView, Slot,
};

/// Key/value inputs for one row of the fixed header grid
#[derive(Clone)]
pub struct HeaderCells {
    key: Entity<InputState>,
    value: Entity<InputState>,
}

pub struct App {
    locale: LocaleState,
    dispatcher: Dispatcher,
    tracker: RequestTracker,
    url_input: Entity<InputState>,
    params_input: Entity<InputState>,
    body_input: Entity<InputState>,
    headers: Vec<HeaderCells>,
    method: HttpMethod,
    active_tab: RequestTab,
    response: ResponseView,
    headers_scroll: ScrollHandle,
    body_scroll: ScrollHandle,
}

const EDITOR_ROWS: usize = 6;
const EDITOR_HEIGHT: f32 = 140.0;

fn method_color(method: HttpMethod) -> Hsla {
    match method {
        HttpMethod::Get => hsla(0.35, 0.8, 0.45, 1.0),    // Green
        HttpMethod::Post => hsla(0.55, 0.8, 0.45, 1.0),   // Blue
        HttpMethod::Put => hsla(0.12, 0.8, 0.50, 1.0),    // Orange
        HttpMethod::Delete => hsla(0.0, 0.8, 0.50, 1.0),  // Red
    }
}

impl App {
    pub fn new(
        locale: LocaleState,
        dispatcher: Dispatcher,
        default_url: Option<&str>,
        header_rows: usize,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let url_input = cx.new(|cx| {
            let mut state = InputState::new(window, cx);
            state.set_placeholder(locale.text(Slot::UrlPlaceholder).to_string(), window, cx);
            if let Some(url) = default_url {
                state.set_value(url.to_string(), window, cx);
            }
            state
        });

        let params_input = cx.new(|cx| {
            InputState::new(window, cx)
                .multi_line(true)
                .rows(EDITOR_ROWS)
                .placeholder(locale.text(Slot::ParamsPlaceholder).to_string())
        });

        let body_input = cx.new(|cx| {
            InputState::new(window, cx)
                .multi_line(true)
                .rows(EDITOR_ROWS)
                .placeholder(locale.text(Slot::DataPlaceholder).to_string())
        });

        let headers = (0..header_rows)
            .map(|_| Self::create_header_cells(&locale, window, cx))
            .collect();

        window.set_window_title(locale.text(Slot::WindowTitle));

        Self {
            locale,
            dispatcher,
            tracker: RequestTracker::new(),
            url_input,
            params_input,
            body_input,
            headers,
            method: HttpMethod::Get,
            active_tab: RequestTab::Params,
            response: ResponseView::new(),
            headers_scroll: ScrollHandle::new(),
            body_scroll: ScrollHandle::new(),
        }
    }

    fn create_header_cells(
        locale: &LocaleState,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> HeaderCells {
        let key_placeholder = locale.text(Slot::HeadersKey).to_string();
        let value_placeholder = locale.text(Slot::HeadersValue).to_string();
        HeaderCells {
            key: cx.new(|cx| InputState::new(window, cx).placeholder(key_placeholder)),
            value: cx.new(|cx| InputState::new(window, cx).placeholder(value_placeholder)),
        }
    }

    fn is_loading(&self) -> bool {
        self.tracker.in_flight().is_some()
    }

    fn header_rows(&self, cx: &Context<Self>) -> Vec<HeaderRow> {
        self.headers
            .iter()
            .map(|cells| {
                HeaderRow::from_cells(
                    &cells.key.read(cx).value(),
                    &cells.value.read(cx).value(),
                )
            })
            .collect()
    }

    fn compose_request(&self, cx: &Context<Self>) -> RequestSpec {
        RequestSpec {
            method: self.method,
            url: self.url_input.read(cx).value().to_string(),
            headers: collect_headers(&self.header_rows(cx)),
            params: parse_params(&self.params_input.read(cx).value()),
            body: self.body_input.read(cx).value().to_string(),
        }
    }

    fn send_request(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let pending = self.dispatcher.send(self.compose_request(cx));
        self.tracker.issue(pending.id());
        cx.notify();

        cx.spawn_in(window, async move |this, cx| {
            let completion = pending.completion().await;

            cx.update(|_window, cx| {
                this.update(cx, |app, cx| app.apply_completion(completion, cx))
            })
        })
        .detach();
    }

    fn apply_completion(&mut self, completion: Completion, cx: &mut Context<Self>) {
        if !self.tracker.accept(&completion) {
            return;
        }
        self.response.set_result(completion.result, &self.locale);
        cx.notify();
    }

    fn switch_language(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.locale.toggle();
        self.response.relocalize(&self.locale);
        self.apply_locale(window, cx);
        cx.notify();
    }

    /// Inputs whose placeholder is a localized string, paired with the slot
    /// that string comes from.
    fn placeholder_registry(&self) -> Vec<(Entity<InputState>, Slot)> {
        let mut registry = vec![
            (self.url_input.clone(), Slot::UrlPlaceholder),
            (self.params_input.clone(), Slot::ParamsPlaceholder),
            (self.body_input.clone(), Slot::DataPlaceholder),
        ];
        for cells in &self.headers {
            registry.push((cells.key.clone(), Slot::HeadersKey));
            registry.push((cells.value.clone(), Slot::HeadersValue));
        }
        registry
    }

    /// Labels are rendered from their slots each frame; only placeholders and
    /// the window title hold text that has to be rewritten here.
    fn apply_locale(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        window.set_window_title(self.locale.text(Slot::WindowTitle));
        for (input, slot) in self.placeholder_registry() {
            let text = self.locale.text(slot).to_string();
            input.update(cx, |state, cx| state.set_placeholder(text, window, cx));
        }
    }

    fn render_title_bar(&self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        TitleBar::new().child(
            div().flex().items_center().gap_2().child(
                div()
                    .text_sm()
                    .font_weight(FontWeight::BOLD)
                    .text_color(hsla(0.0, 0.0, 0.95, 1.0))
                    .child(self.locale.text(Slot::WindowTitle).to_string()),
            ),
        )
    }

    fn render_request_bar(&self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let method = self.method;

        div()
            .flex()
            .items_center()
            .gap_3()
            .p_4()
            .bg(hsla(0.0, 0.0, 0.12, 1.0))
            .border_b_1()
            .border_color(hsla(0.0, 0.0, 0.2, 1.0))
            .child(
                div()
                    .text_sm()
                    .text_color(hsla(0.0, 0.0, 0.7, 1.0))
                    .child(self.locale.text(Slot::MethodLabel).to_string()),
            )
            .child(
                div()
                    .id("method-selector")
                    .px_3()
                    .py_2()
                    .rounded(px(6.0))
                    .bg(hsla(0.0, 0.0, 0.18, 1.0))
                    .border_1()
                    .border_color(hsla(0.0, 0.0, 0.25, 1.0))
                    .cursor_pointer()
                    .hover(|s| s.bg(hsla(0.0, 0.0, 0.22, 1.0)))
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(move |this, _, _, cx| {
                            this.method = this.method.next();
                            cx.notify();
                        }),
                    )
                    .child(
                        div()
                            .font_weight(FontWeight::BOLD)
                            .text_sm()
                            .text_color(method_color(method))
                            .child(method.as_str()),
                    ),
            )
            .child(div().flex_1().child(Input::new(&self.url_input)))
            .child(
                Button::new("send")
                    .primary()
                    .label(self.locale.text(Slot::SendButton).to_string())
                    .loading(self.is_loading())
                    .on_click(cx.listener(|this, _, window, cx| {
                        this.send_request(window, cx);
                    })),
            )
            .child(
                Button::new("switch-language")
                    .label(self.locale.text(Slot::SwitchButton).to_string())
                    .on_click(cx.listener(|this, _, window, cx| {
                        this.switch_language(window, cx);
                    })),
            )
    }

    fn render_header_grid(&self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let column_title = |text: String| {
            div()
                .flex_1()
                .text_xs()
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(hsla(0.0, 0.0, 0.6, 1.0))
                .child(text)
        };

        let rows: Vec<_> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                div()
                    .id(ElementId::Name(format!("header-{}", i).into()))
                    .flex()
                    .gap_2()
                    .mb_2()
                    .child(div().flex_1().child(Input::new(&cells.key).appearance(false)))
                    .child(div().flex_1().child(Input::new(&cells.value).appearance(false)))
            })
            .collect();

        div()
            .flex()
            .flex_col()
            .p_4()
            .bg(hsla(0.0, 0.0, 0.08, 1.0))
            .border_b_1()
            .border_color(hsla(0.0, 0.0, 0.2, 1.0))
            .child(
                div()
                    .mb_2()
                    .text_sm()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(hsla(0.0, 0.0, 0.8, 1.0))
                    .child(self.locale.text(Slot::HeadersLabel).to_string()),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .mb_3()
                    .pb_2()
                    .border_b_1()
                    .border_color(hsla(0.0, 0.0, 0.2, 1.0))
                    .child(column_title(self.locale.text(Slot::HeadersKey).to_string()))
                    .child(column_title(self.locale.text(Slot::HeadersValue).to_string())),
            )
            .children(rows)
    }

    fn render_tabs(&self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let active_tab = self.active_tab;

        div()
            .bg(hsla(0.0, 0.0, 0.10, 1.0))
            .border_b_1()
            .border_color(hsla(0.0, 0.0, 0.2, 1.0))
            .child(
                TabBar::new("request-tabs")
                    .child(
                        Tab::new()
                            .selected(active_tab == RequestTab::Params)
                            .child(self.locale.text(Slot::ParamsTab).to_string())
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.active_tab = RequestTab::Params;
                                cx.notify();
                            })),
                    )
                    .child(
                        Tab::new()
                            .selected(active_tab == RequestTab::Body)
                            .child(self.locale.text(Slot::DataTab).to_string())
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.active_tab = RequestTab::Body;
                                cx.notify();
                            })),
                    ),
            )
    }

    fn render_request_panel(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let input = match self.active_tab {
            RequestTab::Params => &self.params_input,
            RequestTab::Body => &self.body_input,
        };

        div().p_4().bg(hsla(0.0, 0.0, 0.08, 1.0)).child(
            div()
                .p_3()
                .rounded(px(6.0))
                .bg(hsla(0.0, 0.0, 0.06, 1.0))
                .border_1()
                .border_color(hsla(0.0, 0.0, 0.2, 1.0))
                .child(Input::new(input).appearance(false).h(px(EDITOR_HEIGHT))),
        )
    }

    /// A read-only text pane; shows `placeholder` muted while `text` is empty.
    fn render_text_pane(
        id: &'static str,
        text: &str,
        placeholder: &str,
        scroll_handle: &ScrollHandle,
    ) -> impl IntoElement {
        let lines: Vec<_> = if text.is_empty() {
            vec![div()
                .text_xs()
                .text_color(hsla(0.0, 0.0, 0.45, 1.0))
                .child(placeholder.to_string())]
        } else {
            text.lines()
                .map(|line| {
                    let line_content = if line.is_empty() {
                        " ".to_string()
                    } else {
                        line.to_string()
                    };
                    div()
                        .text_xs()
                        .font_family("monospace")
                        .text_color(hsla(0.0, 0.0, 0.85, 1.0))
                        .child(line_content)
                })
                .collect()
        };

        div()
            .flex_1()
            .flex()
            .child(
                div()
                    .id(id)
                    .flex_1()
                    .overflow_y_scroll()
                    .track_scroll(scroll_handle)
                    .p_4()
                    .bg(hsla(0.0, 0.0, 0.04, 1.0))
                    .children(lines),
            )
            .child(Scrollbar::vertical(scroll_handle))
    }

    fn render_response_panel(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let (status_text, headers_text, body_text) = match self.response.rendered() {
            Some(rendered) => (
                rendered.status_text.clone(),
                rendered.headers_text.as_str(),
                rendered.body_text.as_str(),
            ),
            None => (self.locale.text(Slot::ResponseStatus).to_string(), "", ""),
        };

        let status_color = match self.response.result().map(|r| r.status_code()) {
            Some(Some(code)) if (200..300).contains(&code) => hsla(0.35, 0.8, 0.65, 1.0),
            Some(Some(code)) if code >= 400 => hsla(0.0, 0.8, 0.65, 1.0),
            Some(None) => hsla(0.0, 0.8, 0.65, 1.0),
            _ => hsla(0.0, 0.0, 0.8, 1.0),
        };

        let section_label = |text: String| {
            div()
                .px_3()
                .py_2()
                .text_xs()
                .font_weight(FontWeight::SEMIBOLD)
                .text_color(hsla(0.0, 0.0, 0.6, 1.0))
                .bg(hsla(0.0, 0.0, 0.10, 1.0))
                .child(text)
        };

        div()
            .flex_1()
            .flex()
            .flex_col()
            .min_h(px(200.0))
            .bg(hsla(0.0, 0.0, 0.06, 1.0))
            .border_t_1()
            .border_color(hsla(0.0, 0.0, 0.2, 1.0))
            .child(
                div()
                    .p_3()
                    .bg(hsla(0.0, 0.0, 0.10, 1.0))
                    .border_b_1()
                    .border_color(hsla(0.0, 0.0, 0.2, 1.0))
                    .text_sm()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(status_color)
                    .child(status_text),
            )
            .child(section_label(
                self.locale.text(Slot::ResponseHeadersLabel).to_string(),
            ))
            .child(Self::render_text_pane(
                "response-headers",
                headers_text,
                self.locale.text(Slot::ResponseHeadersPlaceholder),
                &self.headers_scroll,
            ))
            .child(section_label(
                self.locale.text(Slot::ResponseContentLabel).to_string(),
            ))
            .child(Self::render_text_pane(
                "response-body",
                body_text,
                self.locale.text(Slot::ResponseContentPlaceholder),
                &self.body_scroll,
            ))
    }
}

impl Render for App {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .bg(hsla(0.0, 0.0, 0.08, 1.0))
            .text_color(hsla(0.0, 0.0, 0.9, 1.0))
            .font_family("Inter, SF Pro Display, system-ui, sans-serif")
            .child(self.render_title_bar(window, cx))
            .child(self.render_request_bar(window, cx))
            .child(self.render_header_grid(window, cx))
            .child(self.render_tabs(window, cx))
            .child(self.render_request_panel(window, cx))
            .child(self.render_response_panel(window, cx))
    }
}
