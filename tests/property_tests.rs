//! Property-based tests for logdock using proptest

mod common;

use common::RecordingBackend;
use logdock::core::{resolve_with, DEBUG_ENV_VAR, LEVEL_ENV_VAR};
use logdock::prelude::*;
use proptest::prelude::*;

// ============================================================================
// Registry Consistency
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Attach,
    DetachByName(usize),
    DetachById(usize),
    DetachUnknown,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Attach),
        1 => (0usize..8).prop_map(Op::DetachByName),
        1 => (0usize..8).prop_map(Op::DetachById),
        1 => Just(Op::DetachUnknown),
    ]
}

proptest! {
    /// After any attach/detach sequence, `list()` holds exactly the sinks
    /// attached and not yet detached, in original attach order.
    #[test]
    fn test_list_matches_model(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (backend, _log) = RecordingBackend::new();
        let logger = Logger::builder().env_lookup(|_| None).backend(backend).build();

        let mut model: Vec<SinkHandle> = Vec::new();
        let mut serial = 0usize;

        for op in ops {
            match op {
                Op::Attach => {
                    let name = format!("sink_{serial}");
                    serial += 1;
                    let handle = logger
                        .try_attach("stdout", SinkOptions::new().name(&name))
                        .unwrap();
                    model.push(handle);
                }
                Op::DetachByName(pick) if !model.is_empty() => {
                    let victim = model.remove(pick % model.len());
                    logger.try_detach(victim.name.as_str()).unwrap();
                }
                Op::DetachById(pick) if !model.is_empty() => {
                    let victim = model.remove(pick % model.len());
                    logger.try_detach(victim.id).unwrap();
                }
                Op::DetachUnknown => {
                    prop_assert!(!logger.detach_sink("never_attached"));
                }
                _ => {}
            }

            let listed: Vec<(SinkId, String)> = logger
                .list_sinks()
                .iter()
                .map(|record| (record.backend_id, record.friendly_name.clone()))
                .collect();
            let expected: Vec<(SinkId, String)> = model
                .iter()
                .map(|handle| (handle.id, handle.name.clone()))
                .collect();
            prop_assert_eq!(listed, expected);
        }
    }
}

// ============================================================================
// Threshold Resolution
// ============================================================================

proptest! {
    /// A non-empty level variable wins over everything, including the
    /// caller's requested level and the debug flag.
    #[test]
    fn test_env_level_always_wins(
        env_level in "[A-Z]{1,12}",
        explicit in prop::option::of("[A-Z]{1,12}"),
        debug_value in prop::option::of("(true|false|1|0)"),
        default in "[A-Z]{1,12}",
    ) {
        let env_level_clone = env_level.clone();
        let resolved = resolve_with(
            explicit.as_deref(),
            LEVEL_ENV_VAR,
            DEBUG_ENV_VAR,
            &default,
            move |key| match key {
                LEVEL_ENV_VAR => Some(env_level_clone.clone()),
                DEBUG_ENV_VAR => debug_value.clone(),
                _ => None,
            },
        );
        prop_assert_eq!(resolved, env_level);
    }

    /// Without any environment override the default always applies: the
    /// requested level is never consulted.
    #[test]
    fn test_default_applies_without_env(
        explicit in prop::option::of("[A-Z]{1,12}"),
        default in "[A-Z]{1,12}",
    ) {
        let resolved = resolve_with(
            explicit.as_deref(),
            LEVEL_ENV_VAR,
            DEBUG_ENV_VAR,
            &default,
            |_| None,
        );
        prop_assert_eq!(resolved, default);
    }

    /// A truthy debug flag forces DEBUG whenever the level variable is
    /// absent.
    #[test]
    fn test_debug_flag_forces_debug(
        explicit in prop::option::of("[A-Z]{1,12}"),
        default in "[A-Z]{1,12}",
        truthy in "(true|True|TRUE|1)",
    ) {
        let resolved = resolve_with(
            explicit.as_deref(),
            LEVEL_ENV_VAR,
            DEBUG_ENV_VAR,
            &default,
            move |key| (key == DEBUG_ENV_VAR).then(|| truthy.clone()),
        );
        prop_assert_eq!(resolved, "DEBUG");
    }
}

// ============================================================================
// Record Sanitization
// ============================================================================

proptest! {
    /// Messages can never fabricate additional log lines.
    #[test]
    fn test_message_sanitization(message in ".*") {
        let record = LogRecord::new("INFO", 20, message.clone());
        prop_assert!(!record.message.contains('\n'));
        prop_assert!(!record.message.contains('\r'));
        prop_assert!(!record.message.contains('\t'));
        if message.contains('\n') {
            prop_assert!(record.message.contains("\\n"));
        }
    }

    /// Emitting arbitrary messages at arbitrary (possibly undeclared)
    /// levels never panics.
    #[test]
    fn test_emit_never_panics(
        level in "[A-Z]{1,10}",
        message in ".*",
    ) {
        let (backend, _log) = RecordingBackend::new();
        let logger = Logger::builder().env_lookup(|_| None).backend(backend).build();
        logger.try_attach("stdout", SinkOptions::new()).unwrap();
        logger.emit(&level, message);
    }
}

// ============================================================================
// Level Registry
// ============================================================================

proptest! {
    /// Declaring a fresh name grows the registry by one; redeclaring it
    /// fails and leaves the size unchanged.
    #[test]
    fn test_declare_size_invariant(
        name in "[A-Z]{3,12}",
        rank in 0i32..1000,
    ) {
        let (backend, _log) = RecordingBackend::new();
        let logger = Logger::builder().env_lookup(|_| None).backend(backend).build();

        let before = logger.level_count();
        let fresh = logger.level(&name).is_none();
        let declared = logger.try_declare_level(&name, rank, None).is_ok();

        prop_assert_eq!(declared, fresh);
        if fresh {
            prop_assert_eq!(logger.level_count(), before + 1);
            prop_assert!(logger.try_declare_level(&name, rank, None).is_err());
            prop_assert_eq!(logger.level_count(), before + 1);
        }
    }
}
