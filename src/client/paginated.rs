//! Page aggregation for Fortnox listing endpoints.
//!
//! Listing endpoints return one page at a time together with a
//! [`MetaInformation`] object. [`Pages`] decides whether only the first
//! page is fetched or every page up to `@TotalPages`; either way the
//! result is one [`Aggregated`] value with the items in page order.

use serde_json::Value;
use tracing::debug;

use super::ClientInner;
use crate::models::{MetaInformation, Query, Resource, META_KEY};
use crate::{Error, Result};

/// Query parameter selecting the page number.
pub const PAGE_PARAM: &str = "page";

/// Query parameter selecting the page size.
pub const LIMIT_PARAM: &str = "limit";

/// Largest page size Fortnox accepts.
pub const MAX_PAGE_SIZE: u32 = 500;

/// How many pages of a listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pages {
    /// Only the first page. Listings can be very large, so this is the
    /// default.
    #[default]
    First,
    /// Every page, fetched one after another.
    All,
}

/// The payload of an aggregated response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// Items of one or more listing pages, in page order
    Collection(Vec<T>),
    /// A single resource
    Single(T),
}

/// The merged result of one or more page fetches.
///
/// # Example
///
/// ```no_run
/// use fortnox_rs::Pages;
///
/// # async fn example(client: fortnox_rs::FortnoxClient) -> fortnox_rs::Result<()> {
/// let years = client.financial_years().list(None, Pages::All).await?;
/// if let Some(meta) = years.meta {
///     println!("{} of {} years", years.len(), meta.total_resources);
/// }
/// for year in years.items() {
///     println!("{}: {} - {}", year.id, year.from_date, year.to_date);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated<T> {
    /// Key the payload was found under
    pub key: &'static str,
    /// The items
    pub data: Payload<T>,
    /// Metadata of the last fetched page
    pub meta: Option<MetaInformation>,
}

impl<T> Aggregated<T> {
    /// The items as a slice. A single resource is a slice of one.
    pub fn items(&self) -> &[T] {
        match &self.data {
            Payload::Collection(items) => items,
            Payload::Single(item) => std::slice::from_ref(item),
        }
    }

    /// Consume the result and return its items.
    pub fn into_items(self) -> Vec<T> {
        match self.data {
            Payload::Collection(items) => items,
            Payload::Single(item) => vec![item],
        }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items().len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// One decoded page.
struct Page<T> {
    data: Payload<T>,
    meta: Option<MetaInformation>,
}

impl ClientInner {
    /// Fetch a listing, merging pages according to `pages`.
    ///
    /// Page 1 is always fetched first, with `limit` applied when given. A
    /// caller-supplied `page` parameter is ignored. A single-object payload
    /// is returned as-is and never paginated.
    pub(crate) async fn fetch_all<T: Resource>(
        &self,
        path: &str,
        query: &Query,
        limit: Option<u32>,
        pages: Pages,
    ) -> Result<Aggregated<T>> {
        let base = query
            .clone()
            .remove(PAGE_PARAM)
            .set_opt(LIMIT_PARAM, limit);

        let first = decode_page::<T>(self.dispatch(path, &base).await?)?;
        let mut items = match first.data {
            Payload::Single(item) => {
                return Ok(Aggregated {
                    key: T::SINGLE_KEY,
                    data: Payload::Single(item),
                    meta: first.meta,
                });
            }
            Payload::Collection(items) => items,
        };
        let mut meta = first.meta;

        if pages == Pages::All {
            let total_pages = meta.map_or(1, |m| m.total_pages);
            for number in 2..=total_pages {
                debug!(path, page = number, total_pages, "fetching next page");
                let page_query = base.clone().set(PAGE_PARAM, number);
                let page = decode_page::<T>(self.dispatch(path, &page_query).await?)?;

                match page.data {
                    Payload::Collection(more) => items.extend(more),
                    Payload::Single(_) => {
                        return Err(Error::UnexpectedResponse(format!(
                            "page {} of {} returned a single {} object",
                            number,
                            path,
                            T::SINGLE_KEY
                        )));
                    }
                }
                meta = page.meta.or(meta);
            }
        }

        Ok(Aggregated {
            key: T::COLLECTION_KEY,
            data: Payload::Collection(items),
            meta,
        })
    }

    /// Fetch a single resource.
    pub(crate) async fn fetch_one<T: Resource>(&self, path: &str, query: &Query) -> Result<T> {
        let result = self.fetch_all::<T>(path, query, None, Pages::First).await?;
        match result.data {
            Payload::Single(item) => Ok(item),
            Payload::Collection(_) => Err(Error::UnexpectedResponse(format!(
                "{} returned a collection where a single {} was expected",
                path,
                T::SINGLE_KEY
            ))),
        }
    }
}

fn decode_page<T: Resource>(body: Value) -> Result<Page<T>> {
    let Value::Object(mut map) = body else {
        return Err(Error::UnexpectedResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let meta = map
        .remove(META_KEY)
        .map(serde_json::from_value::<MetaInformation>)
        .transpose()?;

    let payload = map
        .remove(T::COLLECTION_KEY)
        .or_else(|| map.remove(T::SINGLE_KEY))
        .ok_or_else(|| {
            Error::UnexpectedResponse(format!(
                "response has no {} or {} key",
                T::COLLECTION_KEY,
                T::SINGLE_KEY
            ))
        })?;

    let data = match payload {
        Value::Array(_) => Payload::Collection(serde_json::from_value(payload)?),
        Value::Object(_) => Payload::Single(serde_json::from_value(payload)?),
        other => {
            return Err(Error::UnexpectedResponse(format!(
                "payload is neither an array nor an object: {}",
                other
            )));
        }
    };

    Ok(Page { data, meta })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyInformation, FinancialYear};
    use serde_json::json;

    fn year(id: u32) -> Value {
        json!({ "Id": id, "FromDate": "2024-01-01", "ToDate": "2024-12-31" })
    }

    #[test]
    fn test_decode_collection_page() {
        let body = json!({
            "MetaInformation": { "@TotalPages": 2, "@CurrentPage": 1, "@TotalResources": 3 },
            "FinancialYears": [year(1), year(2)]
        });

        let page = decode_page::<FinancialYear>(body).unwrap();
        let meta = page.meta.unwrap();
        assert_eq!(meta.total_pages, 2);
        match page.data {
            Payload::Collection(items) => {
                assert_eq!(items.iter().map(|y| y.id).collect::<Vec<_>>(), vec![1, 2]);
            }
            Payload::Single(_) => panic!("Expected a collection"),
        }
    }

    #[test]
    fn test_decode_single_page() {
        let page = decode_page::<FinancialYear>(json!({ "FinancialYear": year(7) })).unwrap();
        assert!(page.meta.is_none());
        assert!(matches!(page.data, Payload::Single(ref y) if y.id == 7));
    }

    #[test]
    fn test_decode_singleton_resource() {
        let page = decode_page::<CompanyInformation>(json!({
            "CompanyInformation": { "CompanyName": "Acme AB" }
        }))
        .unwrap();
        assert!(matches!(page.data, Payload::Single(ref c) if c.company_name == "Acme AB"));
    }

    #[test]
    fn test_decode_missing_key() {
        let err = decode_page::<FinancialYear>(json!({ "Vouchers": [] })).err().unwrap();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_decode_non_object() {
        let err = decode_page::<FinancialYear>(json!([1, 2, 3])).err().unwrap();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_aggregated_accessors() {
        let many = Aggregated {
            key: "Numbers",
            data: Payload::Collection(vec![1, 2, 3]),
            meta: None,
        };
        assert_eq!(many.items(), &[1, 2, 3]);
        assert_eq!(many.len(), 3);

        let one = Aggregated {
            key: "Number",
            data: Payload::Single(9),
            meta: None,
        };
        assert_eq!(one.items(), &[9]);
        assert!(!one.is_empty());
        assert_eq!(one.into_items(), vec![9]);
    }

    #[test]
    fn test_default_pages_is_first() {
        assert_eq!(Pages::default(), Pages::First);
    }
}
