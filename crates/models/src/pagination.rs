use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rows per page of the instructor list
pub const INSTRUCTORS_PER_PAGE: u64 = 15;
/// Rows per page of the student list
pub const STUDENTS_PER_PAGE: u64 = 25;

/// Requested page, either a number or the literal `last`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageRequest {
    #[default]
    First,
    Number(u64),
    Last,
}

impl FromStr for PageRequest {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "last" => Ok(Self::Last),
            n => n.parse::<u64>().map(Self::Number).map_err(|_| ()),
        }
    }
}

/// Query string of a paginated list
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PageQuery {
    /// A page number starting at 1, or `last`
    pub page: Option<String>,
}

impl PageQuery {
    /// Parses the raw parameter; `None` means the page cannot be served
    pub fn request(&self) -> Option<PageRequest> {
        match self.page.as_deref() {
            None => Some(PageRequest::First),
            Some(raw) => raw.parse().ok(),
        }
    }
}

/// Position of a page within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page {
    /// 1-based page number
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl Page {
    /// Resolves `request` against a list of `count` rows, or `None` when out of range.
    ///
    /// An empty list still has a single empty first page.
    pub fn resolve(request: PageRequest, count: u64, per_page: u64) -> Option<Self> {
        let num_pages = count.div_ceil(per_page.max(1)).max(1);
        let number = match request {
            PageRequest::First => 1,
            PageRequest::Number(n) => n,
            PageRequest::Last => num_pages,
        };

        (1..=num_pages).contains(&number).then_some(Self {
            number,
            num_pages,
            count,
            per_page,
        })
    }

    /// 0-based index, as SeaORM's paginator expects
    pub fn index(&self) -> u64 {
        self.number - 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Window of navigation links that never points twice at the same page
    pub fn links(&self) -> PageLinks {
        let last = self.num_pages;

        PageLinks {
            first: (self.number > 1).then(|| page_url(1)),
            previous: (self.has_previous() && self.number > 2).then(|| page_url(self.number - 1)),
            next: (self.has_next() && self.number + 1 < last).then(|| page_url(self.number + 1)),
            last: (self.number < last).then(|| page_url(last)),
        }
    }
}

fn page_url(number: u64) -> String {
    format!("?page={number}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageLinks {
    pub first: Option<String>,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn page(number: u64, count: u64) -> Page {
        Page::resolve(PageRequest::Number(number), count, 10).unwrap()
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = Page::resolve(PageRequest::First, 0, INSTRUCTORS_PER_PAGE).unwrap();
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert_eq!(page.links(), PageLinks::default());
    }

    #[test]
    fn test_out_of_range_pages() {
        assert!(Page::resolve(PageRequest::Number(0), 30, 10).is_none());
        assert!(Page::resolve(PageRequest::Number(4), 30, 10).is_none());
        assert!(Page::resolve(PageRequest::Number(3), 30, 10).is_some());
    }

    #[test]
    fn test_last_resolves_to_final_page() {
        let page = Page::resolve(PageRequest::Last, 26, STUDENTS_PER_PAGE).unwrap();
        assert_eq!(page.number, 2);
        assert_eq!(page.index(), 1);
    }

    #[test]
    fn test_links_in_the_middle() {
        let links = page(3, 50).links();
        assert_eq!(links.first.as_deref(), Some("?page=1"));
        assert_eq!(links.previous.as_deref(), Some("?page=2"));
        assert_eq!(links.next.as_deref(), Some("?page=4"));
        assert_eq!(links.last.as_deref(), Some("?page=5"));
    }

    #[test]
    fn test_links_do_not_repeat_first_or_last() {
        let links = page(2, 30).links();
        assert_eq!(links.first.as_deref(), Some("?page=1"));
        assert_eq!(links.previous, None);
        assert_eq!(links.next, None);
        assert_eq!(links.last.as_deref(), Some("?page=3"));
    }

    #[test]
    fn test_links_at_the_edges() {
        let first = page(1, 16).links();
        assert_eq!(first.first, None);
        assert_eq!(first.last.as_deref(), Some("?page=2"));

        let last = page(2, 16).links();
        assert_eq!(last.first.as_deref(), Some("?page=1"));
        assert_eq!(last.last, None);
    }

    #[test]
    fn test_page_query_parsing() {
        let query = |raw: Option<&str>| PageQuery {
            page: raw.map(str::to_string),
        };

        assert_eq!(query(None).request(), Some(PageRequest::First));
        assert_eq!(query(Some("2")).request(), Some(PageRequest::Number(2)));
        assert_eq!(query(Some("last")).request(), Some(PageRequest::Last));
        assert_eq!(query(Some("two")).request(), None);
        assert_eq!(query(Some("-1")).request(), None);
    }
}
