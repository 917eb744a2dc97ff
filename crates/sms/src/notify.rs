//! User-visible notifications

/// Blocking, user-visible notification channel (an alert box in a browser,
/// a highlighted line in a terminal)
pub trait Notifier: Send {
    fn alert(&self, message: &str);
}
