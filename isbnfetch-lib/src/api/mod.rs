use serde::de::DeserializeOwned;

pub(crate) mod isbndb;

use crate::{record::CoverImage, Error, ErrorKind};

pub trait Client
where
    Self: Default,
{
    /// GET `url` and deserialize the JSON body, sending `auth` in the
    /// `Authorization` header when given.
    ///
    /// The body is parsed regardless of the response status: ISBNdb answers
    /// failed lookups with a JSON error body and a non-2xx status, and that
    /// body is the value the caller wants.
    fn get_json<T>(&self, url: &str, auth: Option<&str>) -> Result<T, Error>
    where
        T: DeserializeOwned;

    /// GET `url` and return the raw body bytes with the reported
    /// `Content-Type`, failing on a non-success status.
    fn get_bytes(&self, url: &str) -> Result<CoverImage, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str, auth: Option<&str>) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let mut req = self.get(url);
        if let Some(auth) = auth {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req.send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
            .and_then(|r| r.json().map_err(|e| Error::wrap(ErrorKind::Deserialize, e)))
    }

    fn get_bytes(&self, url: &str) -> Result<CoverImage, Error> {
        let resp = self
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);

        let bytes = resp
            .bytes()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?
            .to_vec();

        if bytes.is_empty() {
            Err(Error::new(ErrorKind::IO, "Response body is empty"))
        } else {
            Ok(CoverImage::new(bytes, content_type))
        }
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_auth, assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer,
    AUTH_SINK, URL_SINK,
};

#[cfg(test)]
mod test {

    use super::*;

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
        pub(crate) static AUTH_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that implementing functions or methods are
    /// parsing the correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    /// Asserts on the `Authorization` value last passed to the [`MockClient`],
    /// `None` when the request carried no auth.
    macro_rules! assert_auth {
        ($expected: expr) => {
            let auth = crate::api::AUTH_SINK.with(|auth| auth.borrow().clone());
            assert_eq!($expected, auth.as_deref());
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyTextProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: &str, auth: Option<&str>) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            AUTH_SINK.with(|sink| *sink.borrow_mut() = auth.map(ToOwned::to_owned));
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }

        fn get_bytes(&self, url: &str) -> Result<CoverImage, Error> {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            P::produce().map(|body| CoverImage::new(body.into_bytes(), None))
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyTextProducer => Ok("".to_owned()),
        NetworkErrorProducer => Err(Error::wrap(ErrorKind::IO, "Network error")),
    }

    pub(crate) use assert_auth;
    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}
