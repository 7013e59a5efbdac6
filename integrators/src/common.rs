//! Common

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Create a progress bar.
///
/// * `len`    - Total number of steps.
/// * `hidden` - Draw nothing.
pub fn create_progress_bar(len: u64, hidden: bool) -> ProgressBar {
    let progress = ProgressBar::new(len);
    if hidden {
        progress.set_draw_target(ProgressDrawTarget::hidden());
        return progress;
    }
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>4}/{len:4} {msg} (ETA {eta})")
    {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}
