use std::time::Duration;

pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Single-slot notification.
///
/// Every `show` starts a new generation. An expiry only hides the toast if it
/// belongs to the current generation, so a newer message restarts the window.
#[derive(Debug, Default)]
pub struct Toast {
    message: String,
    visible: bool,
    generation: u64,
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.message = message.into();
        self.visible = true;
        self.generation += 1;
        self.generation
    }

    /// Returns true if the toast was hidden.
    pub fn expire(&mut self, generation: u64) -> bool {
        if !self.visible || generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn message(&self) -> Option<&str> {
        self.visible.then_some(self.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expire_hides_current_message() {
        let mut toast = Toast::default();
        let generation = toast.show("Copied to clipboard");
        assert_eq!(toast.message(), Some("Copied to clipboard"));
        assert!(toast.expire(generation));
        assert_eq!(toast.message(), None);
    }

    #[test]
    fn test_new_message_cancels_pending_expiry() {
        let mut toast = Toast::default();
        let first = toast.show("first");
        let second = toast.show("second");

        assert!(!toast.expire(first));
        assert_eq!(toast.message(), Some("second"));
        assert!(toast.expire(second));
    }
}
