//! Reference sources.
//!
//! Both sources sit on top of a shared [`FetcherHandle`](crate::FetcherHandle)
//! and only know how to turn an item name into zero or one raw record; the
//! order in which they are consulted lives in [`chain`](crate::chain).

mod open5e;
mod srd;

pub use self::open5e::{Open5eCategory, Open5eSource, pick_best};
pub use self::srd::{SrdCategory, SrdSource};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Appends path segments to a base URL, whether or not it ends in a slash.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| exn::Exn::from(ErrorKind::InvalidUrl(base.to_string())))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

pub(crate) fn decode<T: DeserializeOwned>(url: &Url, body: Value) -> Result<T> {
    serde_json::from_value(body).or_raise(|| ErrorKind::Decode(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://srd.test/api/2014", &["magic-items"], "https://srd.test/api/2014/magic-items")]
    #[case("https://srd.test/api/2014/", &["equipment"], "https://srd.test/api/2014/equipment")]
    #[case("https://open5e.test", &["weapons", ""], "https://open5e.test/weapons/")]
    #[case("https://open5e.test/", &["armor", ""], "https://open5e.test/armor/")]
    fn test_endpoint(#[case] base: &str, #[case] segments: &[&str], #[case] expected: &str) {
        let base = Url::parse(base).unwrap();
        assert_eq!(endpoint(&base, segments).unwrap().as_str(), expected);
    }

    #[test]
    fn test_endpoint_rejects_opaque_base() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(endpoint(&base, &["x"]).is_err());
    }
}
