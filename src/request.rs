//! Request building
//!
//! Turns a stream descriptor, a context and a page token into the URL and
//! query parameters of one GET call.

use crate::context::StreamContext;
use crate::error::{Error, Result};
use crate::stream::StreamDescriptor;
use crate::template;
use url::Url;

/// Page size query parameter
pub const PER_PAGE_PARAM: &str = "perPage";
/// Page number query parameter
pub const PAGE_PARAM: &str = "page";
/// Sort direction query parameter
pub const SORT_PARAM: &str = "sort";
/// Sort field query parameter
pub const ORDER_BY_PARAM: &str = "order_by";

/// Default page size
pub const DEFAULT_PER_PAGE: u32 = 1000;

/// A fully resolved GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// URL without query string
    pub url: Url,
    /// Query parameters in the order they are sent
    pub query: Vec<(String, String)>,
}

impl RequestSpec {
    /// Value of the first query parameter named `name`
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// URL including the query string
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        url
    }
}

/// Builds requests against one base URL
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    per_page: u32,
}

impl RequestBuilder {
    /// Create a builder; the base URL must be an absolute http(s) URL
    pub fn new(base_url: &str, per_page: u32) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{base_url}' is not an http(s) URL"),
            ));
        }
        if per_page == 0 {
            return Err(Error::invalid_value("per_page", "must be at least 1"));
        }
        Ok(Self { base_url, per_page })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Build the request for one page
    ///
    /// `page` is `None` for the first request of a traversal. Every path
    /// placeholder is resolved before anything else, so a missing context
    /// value fails without a request being issued.
    pub fn build(
        &self,
        descriptor: &StreamDescriptor,
        context: &StreamContext,
        page: Option<u32>,
    ) -> Result<RequestSpec> {
        let segments = descriptor
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| template::render(segment, context, descriptor.name()))
            .collect::<Result<Vec<_>>>()?;

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot be a base URL"))?
            .pop_if_empty()
            .extend(&segments);

        let mut query = vec![(PER_PAGE_PARAM.to_string(), self.per_page.to_string())];
        if let Some(page) = page {
            query.push((PAGE_PARAM.to_string(), page.to_string()));
        }
        if let Some(key) = descriptor.replication_key() {
            query.push((SORT_PARAM.to_string(), "asc".to_string()));
            query.push((ORDER_BY_PARAM.to_string(), key.to_string()));
        }

        Ok(RequestSpec { url, query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextProjection;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const BASE: &str = "https://api3.getresponse360.pl/v3";

    fn pairs(query: &[(&str, &str)]) -> Vec<(String, String)> {
        query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn contacts() -> Arc<StreamDescriptor> {
        Arc::new(
            StreamDescriptor::builder("contacts", "/contacts")
                .child_context(ContextProjection::key("contactId"))
                .build()
                .unwrap(),
        )
    }

    fn activities() -> StreamDescriptor {
        StreamDescriptor::builder("contact_activities", "/contacts/{contactId}/activities")
            .parent(&contacts())
            .build()
            .unwrap()
    }

    #[test]
    fn test_first_page_has_no_page_param() {
        let builder = RequestBuilder::new(BASE, DEFAULT_PER_PAGE).unwrap();
        let spec = builder.build(&contacts(), &StreamContext::new(), None).unwrap();

        assert_eq!(spec.url.as_str(), "https://api3.getresponse360.pl/v3/contacts");
        assert_eq!(spec.query, pairs(&[("perPage", "1000")]));
        assert_eq!(spec.query_param("page"), None);
    }

    #[test]
    fn test_later_page_has_page_param() {
        let builder = RequestBuilder::new(BASE, 50).unwrap();
        let spec = builder.build(&contacts(), &StreamContext::new(), Some(2)).unwrap();

        assert_eq!(spec.query, pairs(&[("perPage", "50"), ("page", "2")]));
        assert_eq!(spec.query_param("page"), Some("2"));
    }

    #[test]
    fn test_replication_key_adds_sort() {
        let descriptor = StreamDescriptor::builder("campaigns", "/campaigns")
            .replication_key("createdOn")
            .build()
            .unwrap();
        let builder = RequestBuilder::new(BASE, 10).unwrap();
        let spec = builder.build(&descriptor, &StreamContext::new(), Some(3)).unwrap();

        assert_eq!(
            spec.query,
            pairs(&[
                ("perPage", "10"),
                ("page", "3"),
                ("sort", "asc"),
                ("order_by", "createdOn"),
            ])
        );
    }

    #[test]
    fn test_context_substitution() {
        let builder = RequestBuilder::new(BASE, DEFAULT_PER_PAGE).unwrap();
        let context = StreamContext::new().with_string("contactId", "C1");
        let spec = builder.build(&activities(), &context, None).unwrap();

        assert_eq!(
            spec.url.as_str(),
            "https://api3.getresponse360.pl/v3/contacts/C1/activities"
        );
    }

    #[test]
    fn test_numeric_context_value() {
        let builder = RequestBuilder::new(BASE, DEFAULT_PER_PAGE).unwrap();
        let context = StreamContext::new().with_value("contactId", 42);
        let spec = builder.build(&activities(), &context, None).unwrap();

        assert!(spec.url.path().ends_with("/contacts/42/activities"));
    }

    #[test]
    fn test_context_value_is_percent_encoded() {
        let builder = RequestBuilder::new(BASE, DEFAULT_PER_PAGE).unwrap();
        let context = StreamContext::new().with_string("contactId", "a/b c");
        let spec = builder.build(&activities(), &context, None).unwrap();

        assert!(spec.url.path().ends_with("/contacts/a%2Fb%20c/activities"));
    }

    #[test]
    fn test_missing_context() {
        let builder = RequestBuilder::new(BASE, DEFAULT_PER_PAGE).unwrap();
        let err = builder
            .build(&activities(), &StreamContext::new(), None)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingContext);
        match err {
            Error::MissingContext { stream, key } => {
                assert_eq!(stream, "contact_activities");
                assert_eq!(key, "contactId");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let builder = RequestBuilder::new("http://localhost:8080/", 5).unwrap();
        let spec = builder.build(&contacts(), &StreamContext::new(), None).unwrap();
        assert_eq!(spec.url.as_str(), "http://localhost:8080/contacts");
    }

    #[test]
    fn test_full_url() {
        let builder = RequestBuilder::new(BASE, 5).unwrap();
        let spec = builder.build(&contacts(), &StreamContext::new(), Some(2)).unwrap();
        assert_eq!(
            spec.full_url().as_str(),
            "https://api3.getresponse360.pl/v3/contacts?perPage=5&page=2"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RequestBuilder::new("not a url", 10),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            RequestBuilder::new("ftp://example.com", 10),
            Err(Error::InvalidConfigValue { .. })
        ));
    }

    #[test]
    fn test_zero_per_page_rejected() {
        assert!(RequestBuilder::new(BASE, 0).is_err());
    }
}
