//! Type-safe logging macros using Code types with Display support
//!
//! Context values are any `Display` type: `"key" => value`.

/// Log error with Code type
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), vec![])
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($span), context_refs)
        }
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };
}

/// Log success with Code type
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        $crate::logging::log_warning_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_warning_with_context($message, context_refs)
        }
    };
}

/// Log debug message; context values are only formatted when debug is enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_debug_with_context($message, vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::debug_enabled() {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_debug_with_context($message, context_refs)
        }
    };
}

/// Log a success event carrying `duration_ms` when performance events are enabled
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        if $crate::logging::config::log_performance_events() {
            $crate::log_success!($code, $message,
                "duration_ms" => $duration.as_secs_f64() * 1000.0
            );
        } else {
            $crate::log_success!($code, $message);
        }
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        if $crate::logging::config::log_performance_events() {
            $crate::log_success!($code, $message,
                "duration_ms" => $duration.as_secs_f64() * 1000.0,
                $($key => $value),+
            );
        } else {
            $crate::log_success!($code, $message, $($key => $value),+);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::{codes, service, with_scoped_service};
    use crate::utils::Span;

    #[test]
    fn test_error_macro_with_span_and_context() {
        let (logger, memory) = service::create_test_service();

        with_scoped_service(logger, || {
            log_error!(codes::lexical::NO_MATCHING_TOKEN, "No token matches",
                span = Span::dummy(),
                "character" => '$',
                "offset" => 4usize
            );
        });

        let events = memory.get_events();
        assert_eq!(events.len(), 1);
        assert!(events[0].span.is_some());
        assert_eq!(events[0].context.get("character").map(String::as_str), Some("$"));
        assert_eq!(events[0].context.get("offset").map(String::as_str), Some("4"));
    }

    #[test]
    fn test_performance_macro_logs_success() {
        let (logger, memory) = service::create_test_service();
        let duration = std::time::Duration::from_millis(3);

        with_scoped_service(logger, || {
            log_performance!(codes::success::PIPELINE_COMPLETE, "Pipeline done",
                duration = duration,
                "tokens" => 3
            );
            log_warning!("odd input", "reason" => "test");
        });

        assert!(memory.has_success_with_code(codes::success::PIPELINE_COMPLETE));
        assert_eq!(memory.get_summary().warning_count, 1);
    }
}
