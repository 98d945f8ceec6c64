use super::{
    AddBook, AddBookError, Author, Book, BookAdded, BookId, BookStatus, BookStatusChanged,
    ChangeStatusError, PublicationYear, SearchCriterion, Title,
};

// ============================================================================
// カタログ操作の純粋関数
// ============================================================================

/// 純粋関数：次に払い出すIDを求める
///
/// 空なら1、それ以外は既存IDの最大値+1。
/// 最大IDの書籍を削除した後は同じIDが再び払い出される。
/// 最大IDがu64の上限ならNone（手で編集されたファイルでのみ起こりうる）。
pub fn next_id(books: &[Book]) -> Option<BookId> {
    match books.iter().map(Book::id).max() {
        Some(max) => max.next(),
        None => Some(BookId::first()),
    }
}

/// 純粋関数：重複判定
///
/// 書名（大文字小文字無視）・著者名（大文字小文字無視）・出版年（完全一致）が
/// すべて一致する書籍があれば重複とみなす。
pub fn is_duplicate(
    books: &[Book],
    title: &Title,
    author: &Author,
    year: PublicationYear,
) -> bool {
    books.iter().any(|book| {
        book.title().eq_ignore_case(title)
            && book.author().eq_ignore_case(author)
            && book.year() == year
    })
}

/// 純粋関数：書籍を登録する
///
/// ビジネスルール：
/// - 書名・著者名は空でないこと
/// - 0 < 出版年 <= 現在の暦年
/// - 重複していないこと
/// - 状態はAvailable
///
/// 副作用なし。新しいBookとイベントを返す。コレクションへの追加は呼び出し側の責務。
pub fn add_book(
    books: &[Book],
    cmd: AddBook,
    current_year: i32,
) -> Result<(Book, BookAdded), AddBookError> {
    let title = Title::new(&cmd.title)?;
    let author = Author::new(&cmd.author)?;
    let year = PublicationYear::new(cmd.year, current_year)?;

    if is_duplicate(books, &title, &author, year) {
        return Err(AddBookError::Duplicate);
    }

    let book_id = next_id(books).ok_or(AddBookError::IdSpaceExhausted)?;
    let book = Book::new(book_id, title.clone(), author.clone(), year);

    let event = BookAdded {
        book_id,
        title,
        author,
        year,
    };

    Ok((book, event))
}

/// 純粋関数：書籍の状態を変更する
///
/// 既に同じ状態なら何も変えずにエラーを返す（保存も不要）。
pub fn change_status(
    book: &Book,
    new_status: BookStatus,
) -> Result<(Book, BookStatusChanged), ChangeStatusError> {
    let old_status = book.status();
    if old_status == new_status {
        return Err(ChangeStatusError::AlreadyInStatus(new_status));
    }

    let event = BookStatusChanged {
        book_id: book.id(),
        old_status,
        new_status,
    };

    Ok((book.with_status(new_status), event))
}

/// 純粋関数：IDで位置を探す
pub fn position_of(books: &[Book], book_id: BookId) -> Option<usize> {
    books.iter().position(|book| book.id() == book_id)
}

/// 純粋関数：検索条件に一致するか
///
/// `query`は小文字化済みであること。
/// - 書名・著者名：大文字小文字を無視した部分一致
/// - 出版年：文字列としての完全一致（部分一致・数値比較はしない）
pub fn matches(book: &Book, criterion: SearchCriterion, query: &str) -> bool {
    match criterion {
        SearchCriterion::Title => book.title().contains_lowercase(query),
        SearchCriterion::Author => book.author().contains_lowercase(query),
        SearchCriterion::Year => book.year().to_string() == query,
    }
}

/// 純粋関数：検索
///
/// 元の並び順を保ったまま一致した書籍を返す。
pub fn filter_books<'a>(
    books: &'a [Book],
    criterion: SearchCriterion,
    query: &str,
) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| matches(book, criterion, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    const CURRENT_YEAR: i32 = 2024;

    fn catalog_of(entries: &[(&str, &str, i32)]) -> Vec<Book> {
        let mut books = Vec::new();
        for (title, author, year) in entries {
            let (book, _) =
                add_book(&books, AddBook::new(*title, *author, *year), CURRENT_YEAR).unwrap();
            books.push(book);
        }
        books
    }

    fn book_with_id(id: u64) -> Book {
        Book::new(
            BookId::new(id),
            Title::new("A").unwrap(),
            Author::new("B").unwrap(),
            PublicationYear::new(2000, CURRENT_YEAR).unwrap(),
        )
    }

    // TDD: next_id() のテスト
    #[test]
    fn test_next_id_on_empty_catalog() {
        assert_eq!(next_id(&[]), Some(BookId::new(1)));
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let mut books = catalog_of(&[("A", "X", 2000), ("B", "Y", 2001), ("C", "Z", 2002)]);
        books.remove(0);
        assert_eq!(next_id(&books), Some(BookId::new(4)));
    }

    #[test]
    fn test_next_id_reissues_deleted_max() {
        let mut books = catalog_of(&[("A", "X", 2000), ("B", "Y", 2001)]);
        books.pop();
        assert_eq!(next_id(&books), Some(BookId::new(2)));
    }

    #[test]
    fn test_next_id_at_upper_limit() {
        let books = vec![book_with_id(u64::MAX)];
        assert_eq!(next_id(&books), None);
    }

    // TDD: add_book() のテスト
    #[test]
    fn test_add_book_assigns_sequential_ids() {
        let books = catalog_of(&[("A", "X", 2000), ("B", "Y", 2001), ("C", "Z", 2002)]);
        let ids: Vec<u64> = books.iter().map(|b| b.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_add_book_returns_event() {
        let (book, event) =
            add_book(&[], AddBook::new("Dune", "Herbert", 1965), CURRENT_YEAR).unwrap();

        assert_eq!(book.status(), BookStatus::Available);
        assert_eq!(event.book_id, book.id());
        assert_eq!(event.title.as_str(), "Dune");
        assert_eq!(event.author.as_str(), "Herbert");
        assert_eq!(event.year.value(), 1965);
    }

    #[test]
    fn test_add_book_rejects_duplicate_ignoring_case() {
        let books = catalog_of(&[("Dune", "Herbert", 1965)]);
        let result = add_book(&books, AddBook::new("DUNE", "herbert", 1965), CURRENT_YEAR);
        assert_eq!(result.unwrap_err(), AddBookError::Duplicate);
    }

    #[test]
    fn test_add_book_same_title_different_year_is_not_duplicate() {
        let books = catalog_of(&[("Dune", "Herbert", 1965)]);
        let result = add_book(&books, AddBook::new("Dune", "Herbert", 1966), CURRENT_YEAR);
        assert!(result.is_ok());
    }

    #[test]
    fn test_add_book_fails_when_ids_are_exhausted() {
        let books = vec![book_with_id(u64::MAX)];

        let result = add_book(&books, AddBook::new("Dune", "Herbert", 1965), CURRENT_YEAR);

        assert_eq!(result.unwrap_err(), AddBookError::IdSpaceExhausted);
    }

    #[test]
    fn test_add_book_rejects_invalid_input() {
        let result = add_book(&[], AddBook::new("  ", "Herbert", 1965), CURRENT_YEAR);
        assert_eq!(
            result.unwrap_err(),
            AddBookError::Invalid(ValidationError::EmptyTitle)
        );

        let result = add_book(
            &[],
            AddBook::new("Dune", "Herbert", CURRENT_YEAR + 1),
            CURRENT_YEAR,
        );
        assert!(matches!(
            result.unwrap_err(),
            AddBookError::Invalid(ValidationError::YearOutOfRange { .. })
        ));
    }

    // TDD: change_status() のテスト
    #[test]
    fn test_change_status_success() {
        let books = catalog_of(&[("Dune", "Herbert", 1965)]);
        let (updated, event) = change_status(&books[0], BookStatus::Borrowed).unwrap();

        assert_eq!(updated.status(), BookStatus::Borrowed);
        assert_eq!(event.old_status, BookStatus::Available);
        assert_eq!(event.new_status, BookStatus::Borrowed);
        // 元のBookは変更されない
        assert_eq!(books[0].status(), BookStatus::Available);
    }

    #[test]
    fn test_change_status_same_status_fails() {
        let books = catalog_of(&[("Dune", "Herbert", 1965)]);
        let result = change_status(&books[0], BookStatus::Available);
        assert_eq!(
            result.unwrap_err(),
            ChangeStatusError::AlreadyInStatus(BookStatus::Available)
        );
    }

    // TDD: filter_books() のテスト
    #[test]
    fn test_filter_title_substring() {
        let books = catalog_of(&[("Dune", "Herbert", 1965), ("Dune Messiah", "Herbert", 1969)]);
        let found = filter_books(&books, SearchCriterion::Title, "dune");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id(), BookId::new(1));
        assert_eq!(found[1].id(), BookId::new(2));
    }

    #[test]
    fn test_filter_year_exact_only() {
        let books = catalog_of(&[("Dune", "Herbert", 1965), ("Dune Messiah", "Herbert", 1969)]);

        let found = filter_books(&books, SearchCriterion::Year, "1965");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title().as_str(), "Dune");

        assert!(filter_books(&books, SearchCriterion::Year, "196").is_empty());
    }

    #[test]
    fn test_filter_author_substring() {
        let books = catalog_of(&[
            ("Dune", "Frank Herbert", 1965),
            ("Foundation", "Isaac Asimov", 1951),
        ]);
        let found = filter_books(&books, SearchCriterion::Author, "asimov");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title().as_str(), "Foundation");
    }

    #[test]
    fn test_position_of() {
        let books = catalog_of(&[("A", "X", 2000), ("B", "Y", 2001)]);
        assert_eq!(position_of(&books, BookId::new(2)), Some(1));
        assert_eq!(position_of(&books, BookId::new(99)), None);
    }
}
