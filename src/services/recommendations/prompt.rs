use crate::models::Book;

/// Most recent books included in the prompt
pub const HISTORY_LIMIT: usize = 25;

const EMPTY_HISTORY_PROMPT: &str = "You are a helpful reading guide. The user has not logged any books yet.
Suggest 3 to 5 engaging books (include author) and provide a short reason for each.
Respond ONLY with a JSON array like [{\"title\":\"\",\"author\":\"\",\"reason\":\"\"}].";

/// Builds the model prompt from reading history, most recent first
pub fn build_prompt(books: &[Book]) -> String {
    if books.is_empty() {
        return EMPTY_HISTORY_PROMPT.to_string();
    }

    let history = books
        .iter()
        .take(HISTORY_LIMIT)
        .enumerate()
        .map(|(i, book)| history_line(i + 1, book))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful reading guide. Based on the user's reading history:
{history}
Recommend 3 to 5 new books the user has NOT read yet. Never reuse titles from the history above. Each recommendation must include a real book title and the author's full name.
Return ONLY a pure JSON array (no markdown) of objects structured as:
[{{\"title\":\"\",\"author\":\"\",\"reason\":\"\"}}]. Keep reasons under 35 words and do not mention \"more like\" or similar phrasing."
    )
}

fn history_line(position: usize, book: &Book) -> String {
    let rating = book
        .rating
        .map(|r| format!("{}/5", r))
        .unwrap_or_else(|| "unrated".to_string());
    let year = book
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "year unknown".to_string());

    format!(
        "{}. \"{}\" by {} ({}) - user rating: {}",
        position, book.title, book.author, year, rating
    )
}
