use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Where the renderer writes its status line
pub trait DisplaySurface: Send {
    /// Replace the current line. `position` is `(processed, total)` when the total is known.
    fn update(&mut self, line: &str, position: Option<(u64, u64)>);

    fn succeed(&mut self, line: &str);

    fn fail(&mut self, line: &str);
}

/// Source of display surfaces for the renderer
pub trait ComponentFactory: Send + Sync {
    fn spinner(&self) -> Box<dyn DisplaySurface>;
}

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {msg}";

/// Terminal spinner that switches to a bar once a total is known
pub struct SpinnerSurface {
    bar: ProgressBar,
    determinate: bool,
}

impl SpinnerSurface {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            determinate: false,
        }
    }

    fn switch_style(&mut self, determinate: bool) {
        if self.determinate == determinate {
            return;
        }
        let template = if determinate {
            BAR_TEMPLATE
        } else {
            SPINNER_TEMPLATE
        };
        if let Ok(style) = ProgressStyle::with_template(template) {
            self.bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
        }
        self.determinate = determinate;
    }
}

impl Default for SpinnerSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for SpinnerSurface {
    fn update(&mut self, line: &str, position: Option<(u64, u64)>) {
        match position {
            Some((processed, total)) => {
                self.switch_style(true);
                self.bar.set_length(total);
                self.bar.set_position(processed.min(total));
            }
            None => self.switch_style(false),
        }
        self.bar.set_message(line.to_string());
    }

    fn succeed(&mut self, line: &str) {
        self.bar.finish_with_message(line.to_string());
    }

    fn fail(&mut self, line: &str) {
        self.bar.abandon_with_message(line.to_string());
    }
}

/// Component factory backed by the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleComponents;

impl ComponentFactory for ConsoleComponents {
    fn spinner(&self) -> Box<dyn DisplaySurface> {
        Box::new(SpinnerSurface::new())
    }
}
