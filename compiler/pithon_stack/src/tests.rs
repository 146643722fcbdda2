use super::*;

#[test]
fn passes_through_closure_result() {
    assert_eq!(ensure_sufficient_stack(|| "done"), "done");
}

#[test]
fn passes_through_errors() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
}

#[test]
fn survives_recursion_deeper_than_default_stack() {
    // Mimics a nested call chain where each level keeps a little state alive.
    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| {
            let padding = [depth; 16];
            if depth == 0 {
                0
            } else {
                nest(depth - 1) + u32::from(padding[15] == depth)
            }
        })
    }

    assert_eq!(nest(200_000), 200_000);
}

#[test]
#[cfg(not(target_arch = "wasm32"))]
fn reports_remaining_stack() {
    assert!(remaining_stack().is_some_and(|bytes| bytes > 0));
}
