use log::{info, trace};
use serde::Deserialize;

use crate::{record::CoverImage, BookRecord, Error, ErrorKind};

use super::Client;

const ISBNDB_BOOK_URL: &str = "https://api2.isbndb.com/book/";

pub(crate) fn get_book_by_isbn<C: Client>(api_key: &str, isbn: &str) -> Result<BookRecord, Error> {
    // remove hyphens from ISBN-13 (if applicable)
    let isbn = isbn.replace('-', "");
    info!("Searching for ISBN '{isbn}' using the ISBNdb API");
    let mut url = ISBNDB_BOOK_URL.to_owned();
    url.push_str(&isbn);

    let client = C::default();
    let model: IsbndbModel = client.get_json(&url, Some(api_key))?;

    trace!("Request was successful");

    match model {
        IsbndbModel {
            book: Some(fields), ..
        } => Ok(BookRecord::new(fields)),
        IsbndbModel {
            error_message: Some(message),
            ..
        } => Err(Error::new(ErrorKind::Lookup, message)),
        IsbndbModel { .. } => Err(Error::new(
            ErrorKind::Deserialize,
            "Response contained neither a book nor an error message",
        )),
    }
}

pub(crate) fn get_cover_by_url<C: Client>(url: &str) -> Result<CoverImage, Error> {
    info!("Downloading cover image from '{url}'");
    let client = C::default();
    client.get_bytes(url)
}

/// ISBNdb answers a lookup either with a `book` object or, on failure, with a
/// top-level `errorMessage` string, both under a 200-or-not status. Modelling
/// both as optional keeps the status handling out of the [`Client`] trait.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct IsbndbModel {
    book: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}
