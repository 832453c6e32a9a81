//! Doc-comment rewriting for the generated wrappers.
//!
//! The hand-written docs show the free-function calling convention, context
//! argument included. The wrappers change that convention, so their docs are
//! mechanically rewritten:
//!
//! - forwarding methods store the context, so `(t, ` becomes `(` in inline
//!   examples,
//! - fail-fast wrappers live in the `require` module, so `assert::` paths
//!   are retargeted to `require::`.

/// Drop the context argument from inline call examples.
pub(super) fn drop_context_arg(docs: &[String]) -> Vec<String> {
    docs.iter().map(|line| drop_context_arg_line(line)).collect()
}

/// Retarget `assert::` references to the fail-fast module.
pub(super) fn retarget_to_require(docs: &[String]) -> Vec<String> {
    docs.iter().map(|line| retarget_line(line)).collect()
}

fn drop_context_arg_line(line: &str) -> String {
    line.replace("(t, ", "(")
}

fn retarget_line(line: &str) -> String {
    line.replace("assert::", "require::")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn drops_context_from_examples() {
        let docs = vec![
            " Equal asserts that two values are equal.".to_string(),
            " assert::equal(t, 123, 123, \"should be equal\");".to_string(),
        ];
        assert_eq!(
            drop_context_arg(&docs),
            [
                " Equal asserts that two values are equal.",
                " assert::equal(123, 123, \"should be equal\");",
            ]
        );
    }

    #[test]
    fn retargets_assert_paths() {
        let docs = vec![" assert::equal(t, 123, 123);".to_string()];
        assert_eq!(retarget_to_require(&docs), [" require::equal(t, 123, 123);"]);
    }

    #[test]
    fn rewrites_compose_for_the_require_forward() {
        let docs = vec![" assert::is_true(t, value);".to_string()];
        let rewritten = drop_context_arg(&retarget_to_require(&docs));
        assert_eq!(rewritten, [" require::is_true(value);"]);
    }

    proptest! {
        #[test]
        fn lines_without_context_marker_are_untouched(s in "[A-Za-z0-9 .:,;()`]*") {
            prop_assume!(!s.contains("(t, "));
            prop_assert_eq!(drop_context_arg_line(&s), s);
        }

        #[test]
        fn dropping_context_never_grows_a_line(s in ".*") {
            prop_assert!(drop_context_arg_line(&s).len() <= s.len());
        }

        #[test]
        fn lines_without_assert_path_are_untouched(s in "[A-Za-z0-9 .,;()`]*") {
            prop_assume!(!s.contains("assert::"));
            prop_assert_eq!(retarget_line(&s), s);
        }
    }
}
