//! Jotter Web Application
//!
//! Browser entrypoint for the Dioxus single-page app.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(any(target_arch = "wasm32", test))]
mod bootstrap_config;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod dispatch;
#[cfg(any(target_arch = "wasm32", test))]
mod format;
#[cfg(target_arch = "wasm32")]
mod session_store;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(error) = dioxus::logger::init(dioxus::logger::tracing::Level::INFO) {
        web_sys::console::error_1(&format!("Failed to install logger: {error}").into());
    }

    tracing::info!("Starting Jotter...");
    dioxus::launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jotter_core=info,jotter_web=info")),
        )
        .init();

    match jotter_core::ClientConfig::from_env() {
        Ok(Some(config)) => tracing::info!("Supabase project: {}", config.supabase_url),
        Ok(None) => tracing::warn!(
            "SUPABASE_URL and SUPABASE_ANON_KEY are not set; a web build would be unconfigured"
        ),
        Err(error) => tracing::warn!("Invalid Supabase configuration: {}", error),
    }

    println!(
        "jotter-web runs in the browser. Try: dx serve -p jotter-web --platform web"
    );
}
