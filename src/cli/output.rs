//! Terminal output for the `gatehouse-server` binary.
//!
//! Every status line is a marker followed by a message. With colors on the
//! marker is a glyph, otherwise a bracketed tag so logs stay greppable.

use owo_colors::{OwoColorize, Style};

#[derive(Clone, Copy)]
enum Marker {
    Info,
    Warning,
    Error,
    Created,
    Skipped,
}

impl Marker {
    fn glyph(self) -> &'static str {
        match self {
            Marker::Info => "•",
            Marker::Warning => "⚠",
            Marker::Error => "✗",
            Marker::Created => "✓",
            Marker::Skipped => "○",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Marker::Info => "[INFO]",
            Marker::Warning => "[WARN]",
            Marker::Error => "[ERROR]",
            Marker::Created => "[CREATED]",
            Marker::Skipped => "[SKIPPED]",
        }
    }

    fn style(self) -> Style {
        match self {
            Marker::Info => Style::new().blue(),
            Marker::Warning => Style::new().yellow().bold(),
            Marker::Error => Style::new().red().bold(),
            Marker::Created => Style::new().green().bold(),
            Marker::Skipped => Style::new().yellow(),
        }
    }
}

/// Writes CLI status lines, optionally colored.
pub struct Output {
    /// Whether ANSI colors are emitted
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Colored output.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Plain output, for `--no-color` and non-terminal use.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn render(&self, marker: Marker, message: &str) -> String {
        if self.colored {
            format!(
                "  {} {}",
                marker.glyph().style(marker.style()),
                message.style(marker.style())
            )
        } else {
            format!("  {} {}", marker.tag(), message)
        }
    }

    /// Name and version line shown on startup and by `init`.
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}\n", "GATEHOUSE".bright_cyan().bold(), version.dimmed());
        } else {
            println!("\n   GATEHOUSE {}\n", version);
        }
    }

    /// Neutral status line.
    pub fn info(&self, message: &str) {
        println!("{}", self.render(Marker::Info, message));
    }

    /// Non-fatal problem.
    pub fn warning(&self, message: &str) {
        println!("{}", self.render(Marker::Warning, message));
    }

    /// Goes to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render(Marker::Error, message));
    }

    /// A file written by `init`, e.g. `created("secret", ".env")`.
    pub fn created(&self, kind: &str, path: &str) {
        println!("{}", self.render(Marker::Created, &format!("{} {}", kind, path)));
    }

    /// A file `init` left alone, with the reason.
    pub fn skipped(&self, path: &str, reason: &str) {
        println!("{}", self.render(Marker::Skipped, &format!("{} ({})", path, reason)));
    }

    /// Section title.
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Indented `key: value` line.
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Dimmed suggestion, set off by a blank line.
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Shell command the user is expected to run next.
    pub fn command(&self, cmd: &str) {
        let line = format!("$ {}", cmd);
        if self.colored {
            println!("     {}", line.bright_cyan());
        } else {
            println!("     {}", line);
        }
    }

    /// Final line of a successful command.
    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    /// Blank line.
    pub fn newline(&self) {
        println!();
    }
}
