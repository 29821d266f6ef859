///
/// The functions this extension offers, in registration order.
///
/// | name             | arity | result              |
/// |------------------|-------|---------------------|
/// | `sample`         | 0     | `'yo!'`             |
/// | `sample_version` | 0     | `version::VERSION`  |
///
/// Both are UTF-8 and deterministic, so the host may constant-fold or cache
/// them within a statement.
///

use rusqlite::functions::FunctionFlags;
use rusqlite::types::ValueRef;

use crate::function::{EvalContext, FunctionDescriptor, ResultValue};
use crate::version::VERSION;

pub const SAMPLE_TEXT: &str = "yo!";

const FLAGS: FunctionFlags =
    FunctionFlags::SQLITE_UTF8.union(FunctionFlags::SQLITE_DETERMINISTIC);

fn sample(ctx: &mut dyn EvalContext, _args: &[ValueRef<'_>]) {
    ctx.set_result(ResultValue::static_text(SAMPLE_TEXT));
}

fn sample_version(ctx: &mut dyn EvalContext, _args: &[ValueRef<'_>]) {
    ctx.set_result(ResultValue::static_text(VERSION));
}

pub static FUNCTIONS: [FunctionDescriptor; 2] = [
    FunctionDescriptor {
        name: "sample",
        arity: 0,
        flags: FLAGS,
        callback: sample,
    },
    FunctionDescriptor {
        name: "sample_version",
        arity: 0,
        flags: FLAGS,
        callback: sample_version,
    },
];

/// SQL function names, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    FUNCTIONS.iter().map(|descriptor| descriptor.name)
}

/// Look up a descriptor by name. SQL function names are case-insensitive.
pub fn get(name: &str) -> Option<&'static FunctionDescriptor> {
    FUNCTIONS
        .iter()
        .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::TextLifetime;

    #[test]
    fn test_registration_order() {
        let names: Vec<_> = names().collect();
        assert_eq!(names, vec!["sample", "sample_version"]);
    }

    #[test]
    fn test_descriptors_are_nullary_and_deterministic() {
        for descriptor in &FUNCTIONS {
            assert_eq!(descriptor.arity, 0, "{}", descriptor.name);
            assert!(descriptor.is_deterministic(), "{}", descriptor.name);
            assert!(descriptor.flags.contains(FunctionFlags::SQLITE_UTF8));
        }
    }

    #[test]
    fn test_sample_returns_static_text() {
        let value = get("sample")
            .expect("sample should be registered")
            .evaluate(&[])
            .expect("sample never fails");
        assert_eq!(value.as_text(), Some("yo!"));
        assert_eq!(value.lifetime(), Some(TextLifetime::Static));
    }

    #[test]
    fn test_sample_version_returns_version() {
        let value = get("SAMPLE_VERSION")
            .expect("lookup should ignore case")
            .evaluate(&[])
            .expect("sample_version never fails");
        assert_eq!(value.as_text(), Some(VERSION));
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let descriptor = get("sample").expect("sample should be registered");
        let first = descriptor.evaluate(&[]);
        for _ in 0..100 {
            assert_eq!(descriptor.evaluate(&[]), first);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(get("hello").is_none());
    }
}
