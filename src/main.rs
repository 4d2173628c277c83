use gpui::*;
use gpui_component::*;
use requests_gui::{AppConfig, Dispatcher, LanguageTable, LocaleState, ReqwestTransport};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
use app::App;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "requests_gui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load();
    tracing::info!(locale = config.locale.tag(), header_rows = config.header_rows, "starting Requests GUI");

    let table = Arc::new(LanguageTable::builtin().with_overrides(&config.labels));
    let transport = Arc::new(ReqwestTransport::with_user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ))?);

    let geometry = config.window;
    let window_options = WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(Bounds::new(
            point(px(geometry.x as f32), px(geometry.y as f32)),
            size(px(geometry.width as f32), px(geometry.height as f32)),
        ))),
        ..Default::default()
    };

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        // This must be called before using any GPUI Component features.
        gpui_component::init(cx);

        cx.spawn(async move |cx| {
            cx.open_window(window_options, |window, cx| {
                let locale = LocaleState::new(table, config.locale);
                let dispatcher = Dispatcher::new(transport);
                let view = cx.new(|cx| {
                    App::new(
                        locale,
                        dispatcher,
                        config.default_url.as_deref(),
                        config.header_rows,
                        window,
                        cx,
                    )
                });
                // This first level on the window, should be a Root.
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
