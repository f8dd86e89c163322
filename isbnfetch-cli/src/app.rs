//! The batch fetch loop.
//!
//! One ISBN is fully processed before the next begins: lookup, CSV append,
//! optional cover download, then the configured delay. A failed item is
//! logged and skipped; only the inability to write the report itself ends
//! the run.

use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::Path,
    thread,
    time::Duration,
};

use isbnfetch::{csv, BookRecord, CoverImage, Error, ErrorKind};

use eyre::WrapErr;
use log::{error, warn};

use crate::{
    config::Config,
    status::{now_string, StatusLine},
};

/// Final accounting for one run.
#[derive(Debug)]
pub struct RunOutcome {
    pub details_saved: usize,
    pub images_saved: usize,
    pub total: usize,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Finished. Saved {} of {} ISBN details and {} images. Check above for any warnings or errors.",
            self.details_saved, self.total, self.images_saved
        )
    }
}

/// Runs the batch over every ISBN in `config`, in order.
///
/// The lookup and cover download are passed in as functions so the loop's
/// accounting can be driven without a network.
///
/// # Errors
///
/// An `Err` is returned when the output file cannot be created or appended
/// to, or when a configured image directory cannot be created. Per-item
/// failures are logged and never end the run.
pub fn run<W, L, D>(
    config: &Config,
    status: &mut StatusLine<W>,
    lookup: L,
    download: D,
) -> eyre::Result<RunOutcome>
where
    W: Write,
    L: Fn(&str) -> Result<BookRecord, Error>,
    D: Fn(&str) -> Result<CoverImage, Error>,
{
    status.set(&format!(
        "{}: Preparing file(s) and/or directorie(s)...",
        now_string()
    ));

    // The parent of the output file must already exist; only the image
    // directory is created on demand.
    let mut output = File::create(&config.output_file).wrap_err_with(|| {
        format!(
            "Cannot create the output file '{}'",
            config.output_file.display()
        )
    })?;
    output
        .write_all(csv::header(&config.desired_tags).as_bytes())
        .wrap_err_with(|| {
            format!(
                "Cannot write the header to the output file '{}'",
                config.output_file.display()
            )
        })?;

    if let Some(dir) = &config.image_dir {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Cannot create the image directory '{}'", dir.display()))?;
    }

    let total = config.isbns.len();
    let delay = Duration::from_millis(config.delay_ms);
    let mut details_saved = 0;
    let mut images_saved = 0;

    for (index, isbn) in config.isbns.iter().enumerate() {
        let position = index + 1;

        status.set(&format!(
            "{}: ISBN {position} of {total}: Requesting details...",
            now_string()
        ));
        match lookup(isbn) {
            Ok(record) => {
                status.set(&format!(
                    "{}: ISBN {position} of {total}: Saving details...",
                    now_string()
                ));
                output
                    .write_all(format!("\n{}", csv::row(&record, &config.desired_tags)).as_bytes())
                    .wrap_err_with(|| {
                        format!(
                            "Cannot append to the output file '{}'",
                            config.output_file.display()
                        )
                    })?;
                details_saved += 1;

                if let Some(dir) = &config.image_dir {
                    if let Some(url) = record.image_url() {
                        status.set(&format!(
                            "{}: ISBN {position} of {total}: Downloading image...",
                            now_string()
                        ));
                        match save_cover(dir, isbn, url, &download) {
                            Ok(()) => images_saved += 1,
                            Err(err) => {
                                status.clear();
                                error!("ISBN {position} of {total}: image for '{isbn}' failed: {err}");
                            }
                        }
                    } else {
                        status.clear();
                        warn!("ISBN {position} of {total}: image for '{isbn}' was not found.");
                    }
                }
            }
            Err(err) => {
                status.clear();
                // Lookup errors carry the API's own message; anything else is
                // printed raw.
                match err.message() {
                    Some(message) => {
                        error!("ISBN {position} of {total}: error for '{isbn}': {message}.");
                    }
                    None => error!("ISBN {position} of {total}: error for '{isbn}': {err}"),
                }
            }
        }

        thread::sleep(delay);
    }

    status.clear();
    Ok(RunOutcome {
        details_saved,
        images_saved,
        total,
    })
}

fn save_cover<D>(dir: &Path, isbn: &str, url: &str, download: &D) -> Result<(), Error>
where
    D: Fn(&str) -> Result<CoverImage, Error>,
{
    let cover = download(url)?;
    let path = dir.join(format!("{isbn}.{}", cover.file_extension(url)));
    fs::write(&path, cover.bytes()).map_err(|e| {
        Error::wrap_with(
            ErrorKind::IO,
            e,
            format!("Cannot write the cover file '{}'", path.display()),
        )
    })
}
