//! Progress display for the walk (verbose mode only)

use kdam::{Animation, Bar, BarExt};

/// Create a counter for unknown total (shows count without percentage)
pub fn create_counter(desc: &'static str) -> Bar {
    kdam::tqdm!(
        total = 0,
        desc = desc,
        animation = Animation::Classic,
        position = 0,
        unit = " listings"
    )
}

/// Force a refresh of the bar (e.g. so counter shows "0 listings" immediately).
pub fn refresh_bar(bar: &mut Bar) {
    let _ = bar.refresh();
}

/// Advance the bar by `n`. Display errors are ignored.
pub fn update_progress_bar(bar: &mut Bar, n: usize) {
    let _ = bar.update(n);
}

/// Close out the bar line so following log output starts on a fresh line.
pub fn finish_bar(bar: &mut Bar) {
    let _ = bar.refresh();
    eprintln!();
}

/// Fetch callback for [`walk_with`](crate::pipeline::walk_with): one tick per listing.
pub fn fetch_callback(bar: &mut Option<Bar>) -> Option<impl FnMut(&str) + '_> {
    bar.as_mut()
        .map(|b| move |_url: &str| update_progress_bar(b, 1))
}
