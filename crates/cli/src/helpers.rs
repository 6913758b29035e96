use indicatif::{ProgressBar, ProgressStyle};

pub fn create_progress_bar<S: AsRef<str>>(start: S, hidden: bool) -> ProgressBar {
    let pb = if hidden {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };

    pb.set_message(start.as_ref().to_owned());

    if let Ok(style) = ProgressStyle::with_template(
        "{msg} [{bar:30.183/239}] {bytes:>10}/{total_bytes:10} {bytes_per_sec}",
    ) {
        pb.set_style(style.progress_chars("━╸ "));
    }

    pb
}
