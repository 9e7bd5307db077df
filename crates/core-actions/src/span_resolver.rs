//! Motion span resolver.
//!
//! Bridges `core_text` motion ranges to [`YankRequest`]s: `yy` becomes a
//! linewise request, every other motion a characterwise one. The resolver
//! does not touch editor state.

use core_text::YankMotion;

use crate::YankRequest;

pub fn resolve_yank(motion: YankMotion, text: &str, cursor: usize) -> YankRequest {
    let range = motion.resolve(text, cursor);
    if motion.is_linewise() {
        YankRequest::LineRange(range.start, range.end)
    } else {
        YankRequest::CharRange(range.start, range.end)
    }
}
