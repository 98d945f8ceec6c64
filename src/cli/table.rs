use tabled::{Table, Tabled, settings::Style};

use crate::domain::Book;

/// 一覧表示の1行
#[derive(Debug, Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id().value(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year().value(),
            status: book.status().to_string(),
        }
    }
}

/// 書籍を表形式の文字列にする
pub fn render_books<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
    Table::new(books.into_iter().map(BookRow::from))
        .with(Style::psql())
        .to_string()
}
