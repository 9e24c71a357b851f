//! "Related posts" and "similar guides". Both helpers only see rows already
//! loaded by the caller and never fail; unknown anchors are rejected by the
//! handlers before they get here.

pub mod related;
pub mod similar;
