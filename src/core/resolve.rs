//! Effective threshold resolution for new sinks
//!
//! The resolver is a pure function over the environment: it runs on every
//! attach, so two sinks attached with different requested levels still land
//! on the same environment-forced level whenever the override variable is
//! set.

use std::env;

/// Environment variable holding a level name that overrides everything.
pub const LEVEL_ENV_VAR: &str = "LOG_LEVEL";

/// Environment variable whose truthy value forces DEBUG.
pub const DEBUG_ENV_VAR: &str = "DEBUG";

/// Resolve the effective level for a sink from the process environment.
///
/// Precedence: `env_level_var` if set and non-empty, else `"DEBUG"` when
/// `env_debug_var` holds a truthy string (case-insensitive `true` or `1`),
/// else `default_level`.
///
/// The `explicit` argument carries the caller's requested level but is never
/// consulted, not even when no environment override is present. This mirrors
/// long-standing behavior that callers depend on; do not "fix" the precedence
/// without a migration plan.
pub fn resolve(
    explicit: Option<&str>,
    env_level_var: &str,
    env_debug_var: &str,
    default_level: &str,
) -> String {
    resolve_with(explicit, env_level_var, env_debug_var, default_level, |key| {
        env::var(key).ok()
    })
}

/// [`resolve`] with an injectable environment lookup, for deterministic tests.
pub fn resolve_with<E>(
    explicit: Option<&str>,
    env_level_var: &str,
    env_debug_var: &str,
    default_level: &str,
    env: E,
) -> String
where
    E: Fn(&str) -> Option<String>,
{
    let _ = explicit;

    if let Some(level) = env(env_level_var) {
        if !level.is_empty() {
            return level;
        }
    }

    let debug_mode = env(env_debug_var)
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "true" | "1"));
    if debug_mode {
        return "DEBUG".to_string();
    }

    default_level.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_when_env_empty() {
        let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env_of(&[]));
        assert_eq!(level, "INFO");
    }

    #[test]
    fn test_env_level_wins() {
        let env = env_of(&[("LOG_LEVEL", "WARNING")]);
        let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env);
        assert_eq!(level, "WARNING");
    }

    #[test]
    fn test_env_level_overrides_explicit() {
        // The requested level loses to the environment, and loses to the
        // default when no override is set.
        let env = env_of(&[("LOG_LEVEL", "WARNING")]);
        for requested in ["DEBUG", "ERROR"] {
            let level = resolve_with(Some(requested), LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", &env);
            assert_eq!(level, "WARNING");
        }

        let level = resolve_with(Some("ERROR"), LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env_of(&[]));
        assert_eq!(level, "INFO");
    }

    #[test]
    fn test_empty_env_level_ignored() {
        let env = env_of(&[("LOG_LEVEL", "")]);
        let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env);
        assert_eq!(level, "INFO");
    }

    #[test]
    fn test_debug_flag_truthy_values() {
        for truthy in ["true", "True", "TRUE", "1"] {
            let env = env_of(&[("DEBUG", truthy)]);
            let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env);
            assert_eq!(level, "DEBUG", "'{truthy}' should enable debug mode");
        }

        for falsy in ["false", "0", "yes", ""] {
            let env = env_of(&[("DEBUG", falsy)]);
            let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env);
            assert_eq!(level, "INFO", "'{falsy}' should not enable debug mode");
        }
    }

    #[test]
    fn test_level_var_beats_debug_flag() {
        let env = env_of(&[("LOG_LEVEL", "ERROR"), ("DEBUG", "true")]);
        let level = resolve_with(None, LEVEL_ENV_VAR, DEBUG_ENV_VAR, "INFO", env);
        assert_eq!(level, "ERROR");
    }
}
