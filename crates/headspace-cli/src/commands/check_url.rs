//! `headspace check-url` - link target safety predicate.

use colored::Colorize;
use headspace_core::markdown::is_safe_url;

/// Returns true when the URL is safe; the caller maps false to exit code 1.
pub fn run(url: &str) -> bool {
    if is_safe_url(url) {
        println!("{} {url}", "safe".green());
        true
    } else {
        println!("{} {url}", "unsafe".red());
        false
    }
}
