/// Parser-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum line width of the rendered usage text.
    pub width: usize,
    /// Whether the root declares `-h, --help`.
    pub help: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config { width: 100, help: true }
    }
}

impl Config {
    pub fn width(mut self, width: usize) -> Config {
        self.width = width;
        self
    }

    pub fn no_help(mut self) -> Config {
        self.help = false;
        self
    }
}
