#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![doc = include_str!("../README.md")]

mod api;
pub mod csv;
mod error;
mod record;

pub use error::{Error, ErrorKind};
pub use record::{BookRecord, CoverImage};

use log::trace;

type Client = reqwest::blocking::Client;

/// Fetch the full book record for `isbn` from the ISBNdb API.
///
/// Hyphens in the ISBN are stripped before the request is made, so both
/// `978-0735619678` and `9780735619678` address the same book. The `api_key`
/// is sent in the `Authorization` header as ISBNdb expects.
///
/// # Errors
///
/// An `Err` of kind [`ErrorKind::Lookup`] is returned when the API answers
/// with a structured error message (typically an unknown ISBN), carrying that
/// message.
/// An `Err` is returned when the request fails or the response cannot be
/// deserialized into a book record.
#[inline]
pub fn book_by_isbn(api_key: &str, isbn: &str) -> Result<BookRecord, Error> {
    trace!("Fetch book record for ISBN '{isbn}'");
    api::isbndb::get_book_by_isbn::<Client>(api_key, isbn)
}

/// Download the cover image at `url`.
///
/// The returned [`CoverImage`] keeps the `Content-Type` the server reported,
/// if any, so the caller can pick a file extension with
/// [`CoverImage::file_extension`].
///
/// # Errors
///
/// An `Err` is returned when the request fails or the response body cannot be
/// read.
#[inline]
pub fn cover_by_url(url: &str) -> Result<CoverImage, Error> {
    trace!("Download cover image from '{url}'");
    api::isbndb::get_cover_by_url::<Client>(url)
}
