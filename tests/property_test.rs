mod common;

use std::thread;

use byname::{invoke, ErrorKind};
use common::{string_result, Toolbox};
use proptest::prelude::*;

fn json_strings(values: &[String]) -> Vec<u8> {
    serde_json::to_vec(values).unwrap()
}

proptest! {
    #[test]
    fn fixed_method_accepts_only_its_arity(count in 0usize..6) {
        let toolbox = Toolbox::default();
        let args: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        let result = invoke(&toolbox, "pair", &json_strings(&args));
        if count == 2 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::ArityMismatch);
        }
    }

    #[test]
    fn variadic_method_accepts_any_tail(sep in "[-,;]", parts in prop::collection::vec("[a-z]{0,4}", 0..8)) {
        let toolbox = Toolbox::default();
        let mut args = vec![sep.clone()];
        args.extend(parts.iter().cloned());
        let results = invoke(&toolbox, "join", &json_strings(&args)).unwrap();
        let expected = parts.join(&sep);
        prop_assert_eq!(string_result(&results, 0), Some(expected.as_str()));
    }

    #[test]
    fn add_matches_native_addition(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let toolbox = Toolbox::default();
        let payload = serde_json::to_vec(&(a, b)).unwrap();
        let results = invoke(&toolbox, "add", &payload).unwrap();
        prop_assert_eq!(results[0].downcast_ref::<i64>(), Some(&(a + b)));
    }

    #[test]
    fn invocation_is_deterministic(a in any::<i32>(), b in any::<i32>()) {
        let toolbox = Toolbox::default();
        let payload = serde_json::to_vec(&(a as i64, b as i64)).unwrap();
        let first = invoke(&toolbox, "add", &payload).unwrap();
        let second = invoke(&toolbox, "add", &payload).unwrap();
        prop_assert_eq!(first[0].downcast_ref::<i64>(), second[0].downcast_ref::<i64>());
    }

    #[test]
    fn unknown_names_never_resolve(name in "[a-z]{1,12}") {
        prop_assume!(!["add", "join", "pair", "record", "nothing"].contains(&name.as_str()));
        let toolbox = Toolbox::default();
        prop_assert_eq!(
            invoke(&toolbox, &name, b"[]").unwrap_err().kind(),
            ErrorKind::MethodNotFound
        );
    }
}

#[test]
fn test_concurrent_invocations_on_distinct_targets() {
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|n| {
                scope.spawn(move || {
                    let mut toolbox = Toolbox::default();
                    for _ in 0..n {
                        invoke(&mut toolbox, "record", br#"["tick"]"#).unwrap();
                    }
                    let payload = serde_json::to_vec(&(n, n)).unwrap();
                    let sum = invoke(&toolbox, "add", &payload).unwrap();
                    (toolbox.calls, *sum[0].downcast_ref::<i64>().unwrap())
                })
            })
            .collect();

        for (n, handle) in handles.into_iter().enumerate() {
            let (calls, sum) = handle.join().unwrap();
            assert_eq!(calls, n);
            assert_eq!(sum, 2 * n as i64);
        }
    });
}

#[test]
fn test_shared_target_across_threads() {
    let toolbox = Toolbox::default();
    thread::scope(|scope| {
        for n in 0..4i64 {
            let toolbox = &toolbox;
            scope.spawn(move || {
                let payload = serde_json::to_vec(&(n, 1)).unwrap();
                let results = invoke(toolbox, "add", &payload).unwrap();
                assert_eq!(results[0].downcast_ref::<i64>(), Some(&(n + 1)));
            });
        }
    });
}
