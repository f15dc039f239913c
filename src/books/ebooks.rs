// src/books/ebooks.rs

use std::{sync::LazyLock, time::Duration};

use async_trait::async_trait;
use regex::Regex;
use url::Url;

use super::{BookError, BookSource};
use crate::{
    models::{book::Book, personality::Genre},
    utils::html::strip_tags,
};

/// Opening tag of an element carrying `class` as one of its class tokens.
/// Capture 1 is the tag name.
fn class_pattern(class: &str) -> Regex {
    Regex::new(&format!(
        r#"<(\w+)\b[^>]*\bclass="(?:[^"]*\s)?{}(?:\s[^"]*)?"[^>]*>"#,
        regex::escape(class)
    ))
    .unwrap()
}

static BOOK_DETAILS: LazyLock<Regex> = LazyLock::new(|| class_pattern("book-details"));
static TITLE: LazyLock<Regex> = LazyLock::new(|| class_pattern("title"));
static AUTHOR: LazyLock<Regex> = LazyLock::new(|| class_pattern("author"));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| class_pattern("description"));
static HREF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bhref="([^"]*)""#).unwrap());
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img\b[^>]*\bdata-src="([^"]*)""#).unwrap());
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<p\b[^>]*>(.*?)</p>"#).unwrap());

/// Subject listings of the ebooks.com catalog.
pub struct EbooksCatalog {
    client: reqwest::Client,
    base_url: Url,
}

impl EbooksCatalog {
    pub fn new(base_url: &str) -> Result<Self, BookError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("bookmatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Listing page of a genre, e.g. `.../subjects/history/`.
    pub fn listing_url(&self, genre: Genre) -> Result<Url, BookError> {
        Ok(self.base_url.join(&format!("{}/", genre.as_str()))?)
    }
}

#[async_trait]
impl BookSource for EbooksCatalog {
    async fn books_for(&self, genre: Genre) -> Result<Vec<Book>, BookError> {
        let url = self.listing_url(genre)?;
        let html = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let books = parse_listing(&html, &url, genre);
        tracing::debug!(genre = %genre, count = books.len(), "Fetched book listing");
        Ok(books)
    }
}

/// Inner HTML of every element opened by `open`, up to the first matching
/// closing tag. Nested elements of the same tag name end the match early.
fn class_elements<'a>(html: &'a str, open: &Regex) -> Vec<&'a str> {
    open.captures_iter(html)
        .filter_map(|caps| {
            let tag = caps.get(1)?.as_str();
            let start = caps.get(0)?.end();
            let rest = &html[start..];
            let end = rest.find(&format!("</{}>", tag)).unwrap_or(rest.len());
            Some(&rest[..end])
        })
        .collect()
}

fn resolve(page: &Url, href: &str) -> String {
    page.join(href).map(String::from).unwrap_or_default()
}

/// Extracts books from a subject listing page.
///
/// Each `book-details` block yields one book; blocks without a title are skipped.
pub fn parse_listing(html: &str, page: &Url, genre: Genre) -> Vec<Book> {
    let starts: Vec<usize> = BOOK_DETAILS.find_iter(html).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            let block = &html[start..end];

            let title_html = class_elements(block, &TITLE).into_iter().next()?;
            let title = strip_tags(title_html);
            if title.is_empty() {
                return None;
            }

            let link = HREF
                .captures(title_html)
                .map(|c| resolve(page, &c[1]))
                .unwrap_or_default();

            let author = class_elements(block, &AUTHOR)
                .into_iter()
                .map(strip_tags)
                .filter(|a| !a.is_empty())
                .collect::<Vec<_>>()
                .join(", ");

            let image = IMAGE
                .captures(block)
                .map(|c| resolve(page, &c[1]))
                .unwrap_or_default();

            let description = class_elements(block, &DESCRIPTION)
                .into_iter()
                .next()
                .and_then(|d| PARAGRAPH.captures(d))
                .map(|c| strip_tags(&c[1]))
                .unwrap_or_default();

            Some(Book {
                title,
                author,
                description,
                image,
                link,
                genre,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
        <div class="book-details clearfix">
            <img class="cover" data-src="https://img.example.com/rome.jpg" alt="">
            <h2 class="title"><a href="/en-gh/book/1/rome/mary-beard/">SPQR: A History of <em>Ancient</em> Rome</a></h2>
            <span class="author"><a href="/author/beard">Mary Beard</a></span>
            <div class="description"><p>From the founding myths to the Empire.</p><p>Second paragraph.</p></div>
        </div>
        <div class="book-details">
            <h2 class="title"><a href="https://www.ebooks.com/en-gh/book/2/">Team of Rivals</a></h2>
            <span class="author">Doris Kearns Goodwin</span>
            <span class="author">Another Author</span>
        </div>
        <div class="book-details">
            <h2 class="book-title">Not a title element</h2>
        </div>
        </body></html>
    "#;

    fn page() -> Url {
        Url::parse("https://www.ebooks.com/en-gh/subjects/history/").unwrap()
    }

    #[test]
    fn test_parse_listing() {
        let books = parse_listing(LISTING, &page(), Genre::History);
        assert_eq!(books.len(), 2);

        let rome = &books[0];
        assert_eq!(rome.title, "SPQR: A History of Ancient Rome");
        assert_eq!(rome.link, "https://www.ebooks.com/en-gh/book/1/rome/mary-beard/");
        assert_eq!(rome.author, "Mary Beard");
        assert_eq!(rome.image, "https://img.example.com/rome.jpg");
        assert_eq!(rome.description, "From the founding myths to the Empire.");
        assert_eq!(rome.genre, Genre::History);

        let rivals = &books[1];
        assert_eq!(rivals.link, "https://www.ebooks.com/en-gh/book/2/");
        assert_eq!(rivals.author, "Doris Kearns Goodwin, Another Author");
        assert_eq!(rivals.image, "");
        assert_eq!(rivals.description, "");
    }

    #[test]
    fn test_parse_listing_decodes_entities() {
        let html = r#"
            <div class="book-details">
                <h2 class="title"><a href="/book/3/">Law &amp; Order</a></h2>
                <span class="author">O&#39;Brien &amp; Sons</span>
                <div class="description"><p>Courts &lt;and&gt; cases</p></div>
            </div>
        "#;
        let books = parse_listing(html, &page(), Genre::Law);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Law & Order");
        assert_eq!(books[0].author, "O'Brien & Sons");
        assert_eq!(books[0].description, "Courts <and> cases");
    }

    #[test]
    fn test_parse_listing_without_books() {
        assert!(parse_listing("<html><body>Maintenance</body></html>", &page(), Genre::Art).is_empty());
    }

    #[test]
    fn test_listing_url() {
        let catalog = EbooksCatalog::new("https://www.ebooks.com/en-gh/subjects").unwrap();
        assert_eq!(
            catalog.listing_url(Genre::Computers).unwrap().as_str(),
            "https://www.ebooks.com/en-gh/subjects/computers/"
        );
    }
}
