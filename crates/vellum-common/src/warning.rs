//! Parser warnings with colored terminal output.
//!
//! Deduplicates so a recovered error repeated across a document is reported
//! once. Used by the tokenizer, tree builder, and DOM to surface recovered
//! parse errors and unsupported constructs.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Messages already printed, keyed by component and text.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Warn about a recovered parse error (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Tokenizer", "unterminated comment runs to end of input");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let fresh = WARNED
        .lock()
        .unwrap()
        .insert(format!("[{component}] {message}"));
    if fresh {
        eprintln!("{YELLOW}[vellum {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call between independent parses)
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    WARNED.lock().unwrap().clear();
}
