use tracing::Level;

/// Component-tagged logging for the frontend.
///
/// Messages always go through `tracing`; in the browser they are also
/// mirrored to the devtools console.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(Level::DEBUG, component, message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(Level::INFO, component, message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(Level::WARN, component, message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(Level::ERROR, component, message);
    }

    fn log(level: Level, component: &str, message: &str) {
        match level {
            Level::DEBUG => tracing::debug!(component, "{}", message),
            Level::INFO => tracing::info!(component, "{}", message),
            Level::WARN => tracing::warn!(component, "{}", message),
            Level::ERROR => tracing::error!(component, "{}", message),
            _ => tracing::trace!(component, "{}", message),
        }

        #[cfg(target_arch = "wasm32")]
        Self::mirror_to_console(level, &format_line(component, message));
    }

    #[cfg(target_arch = "wasm32")]
    fn mirror_to_console(level: Level, line: &str) {
        let line = line.to_string();
        match level {
            Level::ERROR => gloo::console::error!(line),
            Level::WARN => gloo::console::warn!(line),
            Level::INFO => gloo::console::info!(line),
            _ => gloo::console::debug!(line),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn format_line(component: &str, message: &str) -> String {
    format!("[{}] {}", component, message)
}
