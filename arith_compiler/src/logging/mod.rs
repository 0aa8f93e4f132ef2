//! Global logging module for the arithmetic compiler
//!
//! Thread-safe global logging with per-source context, a thread-scoped
//! override used by tests, and a macro interface (`log_error!`, `log_success!`,
//! `log_info!`, `log_warning!`, `log_debug!`).

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Source currently being compiled on this thread
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub source_id: usize,
    pub events_logged: usize,
}

thread_local! {
    static SOURCE_CONTEXT: RefCell<Option<SourceContext>> = const { RefCell::new(None) };
    static SCOPED_SERVICE: RefCell<Option<Arc<LoggingService>>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(LoggingService::with_config());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    codes::ensure_registered(
        "System",
        &[
            codes::system::INTERNAL_ERROR,
            codes::file_processing::FILE_NOT_FOUND,
            codes::lexical::NO_MATCHING_TOKEN,
            codes::syntax::UNEXPECTED_END_OF_INPUT,
        ],
    )?;

    logging_service.log_success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

// ============================================================================
// SCOPED SERVICE
// ============================================================================

/// Route this thread's log events to `service` while `f` runs
pub fn with_scoped_service<F, R>(service: Arc<LoggingService>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = SCOPED_SERVICE.with(|slot| slot.borrow_mut().replace(service));
    let result = f();
    SCOPED_SERVICE.with(|slot| *slot.borrow_mut() = previous);
    result
}

fn active_service() -> Option<Arc<LoggingService>> {
    SCOPED_SERVICE
        .with(|slot| slot.borrow().clone())
        .or_else(|| GLOBAL_LOGGER.get().cloned())
}

/// Whether a debug event would reach any logger (used by `log_debug!`)
pub fn debug_enabled() -> bool {
    active_service()
        .map(|service| service.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

// ============================================================================
// SOURCE CONTEXT MANAGEMENT
// ============================================================================

pub fn set_source_context(name: &str, source_id: usize) {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(SourceContext {
            name: name.to_string(),
            source_id,
            events_logged: 0,
        });
    });
}

pub fn clear_source_context() {
    SOURCE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with source context
pub fn with_source_context<F, R>(name: &str, source_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_source_context(name, source_id);
    let result = f();
    clear_source_context();
    result
}

pub fn get_current_source_context() -> Option<SourceContext> {
    SOURCE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach source context and deliver to the active service
///
/// Once a source has logged its quota of events only errors get through.
pub fn dispatch(event: LogEvent) {
    let event = SOURCE_CONTEXT.with(|ctx| {
        let mut ctx = ctx.borrow_mut();
        match ctx.as_mut() {
            Some(source) => {
                if source.events_logged >= config::get_max_log_events_per_source()
                    && !event.is_error()
                {
                    return None;
                }
                source.events_logged += 1;
                Some(
                    event
                        .with_context("source", &source.name)
                        .with_context("source_id", &source.source_id.to_string()),
                )
            }
            None => Some(event),
        }
    });

    if let (Some(event), Some(service)) = (event, active_service()) {
        service.log_event(event);
    }
}

fn with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = with_pairs(LogEvent::error(code, message), context);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::success(code, message), context));
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::info(message), context));
}

/// Used by `log_warning!`
pub fn log_warning_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::warning(message), context));
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::debug(message), context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_context_management() {
        assert!(get_current_source_context().is_none());

        let result = with_source_context("input.arith", 3, || {
            let context = get_current_source_context().unwrap();
            assert_eq!(context.name, "input.arith");
            assert_eq!(context.source_id, 3);
            42
        });

        assert_eq!(result, 42);
        assert!(get_current_source_context().is_none());
    }

    #[test]
    fn test_scoped_service_receives_macro_events() {
        let (service, memory) = service::create_test_service();

        with_scoped_service(service, || {
            with_source_context("expr", 1, || {
                log_success!(codes::success::TOKENIZATION_COMPLETE, "done", "tokens" => 5);
                log_debug!("trace", "kind" => "NUM");
            });
        });

        let events = memory.get_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].context.get("tokens").map(String::as_str), Some("5"));
        assert_eq!(events[0].context.get("source").map(String::as_str), Some("expr"));
        assert_eq!(events[1].level, LogLevel::Debug);
    }

    #[test]
    fn test_scoped_service_is_restored() {
        let (service, memory) = service::create_test_service();
        with_scoped_service(service, || {});

        log_info!("after scope");
        assert_eq!(memory.event_count(), 0);
    }

    #[test]
    fn test_source_event_quota_keeps_errors() {
        let (service, memory) = service::create_test_service();
        let quota = config::get_max_log_events_per_source();

        with_scoped_service(service, || {
            with_source_context("noisy", 1, || {
                for _ in 0..quota + 5 {
                    log_info!("chatter");
                }
                log_error!(codes::system::INTERNAL_ERROR, "still reported");
            });
        });

        assert_eq!(memory.event_count(), quota + 1);
        assert!(memory.has_error_with_code(codes::system::INTERNAL_ERROR));
    }
}
