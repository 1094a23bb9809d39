//! Visual theme and styling.

use console::Style;

/// Terminal theme for clusterup output.
#[derive(Debug, Clone)]
pub struct ClusterUpTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for contextual hints (cyan dim).
    pub hint: Style,
}

impl Default for ClusterUpTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterUpTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("☸"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = ClusterUpTheme::plain();
        let msg = theme.format_success("Cluster ready");
        assert_eq!(msg, "✓ Cluster ready");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = ClusterUpTheme::plain();
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
    }

    #[test]
    fn theme_formats_error() {
        let theme = ClusterUpTheme::plain();
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn theme_formats_header() {
        let theme = ClusterUpTheme::plain();
        let msg = theme.format_header("Create cluster");
        assert!(msg.contains("Create cluster"));
        assert!(msg.contains("☸"));
    }

    #[test]
    fn colored_theme_keeps_text() {
        let theme = ClusterUpTheme::new();
        assert!(theme.format_success("test").contains("test"));
    }
}
