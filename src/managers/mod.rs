// State managers
// Managers own per-page state: session history and the scroll-capturing history wrapper.

pub mod history_interceptor;
pub mod session_history;
