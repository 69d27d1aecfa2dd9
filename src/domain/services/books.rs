use crate::domain::model::{Book, BookReport};
use crate::domain::services::mean;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct BookService {
    long_book_pages: u32,
}

impl Default for BookService {
    fn default() -> Self {
        Self::new(300)
    }
}

impl BookService {
    pub fn new(long_book_pages: u32) -> Self {
        Self { long_book_pages }
    }

    /// Titles of books longer than the page threshold, alphabetically.
    pub fn long_titles_sorted(&self, books: &[Book]) -> Vec<String> {
        let mut titles: Vec<String> = books
            .iter()
            .filter(|b| b.pages > self.long_book_pages)
            .map(|b| b.title.clone())
            .collect();
        titles.sort();
        titles
    }

    pub fn average_pages(&self, books: &[Book]) -> f64 {
        mean(books.iter().map(|b| f64::from(b.pages)))
    }

    pub fn count_by_author(&self, books: &[Book]) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for book in books {
            *counts.entry(book.author.clone()).or_default() += 1;
        }
        counts
    }

    /// The highest priced book; the first one wins a tie.
    pub fn most_expensive<'a>(&self, books: &'a [Book]) -> Option<&'a Book> {
        books
            .iter()
            .reduce(|best, b| if b.price > best.price { b } else { best })
    }

    pub fn report(&self, books: &[Book]) -> BookReport {
        BookReport {
            long_titles: self.long_titles_sorted(books),
            average_pages: self.average_pages(books),
            count_by_author: self.count_by_author(books),
            most_expensive: self.most_expensive(books).cloned(),
        }
    }
}
