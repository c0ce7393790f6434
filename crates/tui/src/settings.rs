//! Session settings for the terminal app
//!
//! Settings only affect presentation and live outside the tracker core.
//! They reset on restart.

/// Text size applied to list rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSize::Small => "Small",
            TextSize::Medium => "Medium",
            TextSize::Large => "Large",
        }
    }

    /// Next size in the Small, Medium, Large cycle
    pub fn next(&self) -> Self {
        match self {
            TextSize::Small => TextSize::Medium,
            TextSize::Medium => TextSize::Large,
            TextSize::Large => TextSize::Small,
        }
    }
}

/// User-facing toggles shown on the settings screen
#[derive(Debug, Clone)]
pub struct Settings {
    pub dark_mode: bool,
    pub text_size: TextSize,
    pub push_notifications: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            text_size: TextSize::Medium,
            push_notifications: true,
        }
    }
}

impl Settings {
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn cycle_text_size(&mut self) {
        self.text_size = self.text_size.next();
    }

    pub fn toggle_push_notifications(&mut self) {
        self.push_notifications = !self.push_notifications;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.dark_mode);
        assert_eq!(settings.text_size, TextSize::Medium);
        assert!(settings.push_notifications);
    }

    #[test]
    fn test_text_size_cycles_through_all_sizes() {
        let mut settings = Settings::default();

        settings.cycle_text_size();
        assert_eq!(settings.text_size, TextSize::Large);
        settings.cycle_text_size();
        assert_eq!(settings.text_size, TextSize::Small);
        settings.cycle_text_size();
        assert_eq!(settings.text_size, TextSize::Medium);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();

        settings.toggle_dark_mode();
        assert!(!settings.dark_mode);
        settings.toggle_push_notifications();
        assert!(!settings.push_notifications);
        settings.toggle_dark_mode();
        assert!(settings.dark_mode);
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(TextSize::Small.as_str(), "Small");
        assert_eq!(TextSize::Medium.as_str(), "Medium");
        assert_eq!(TextSize::Large.as_str(), "Large");
    }
}
