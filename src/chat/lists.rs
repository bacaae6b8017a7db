use crate::chat::reply::{Button, Reply};
use crate::chat::token::CallbackToken;
use crate::db::operations::words;
use crate::db::Database;
use crate::word::{UserId, Word, WordEntry, WordId};

/// Telegram truncates long button labels; keep them readable instead.
const MAX_BUTTON_LABEL_CHARS: usize = 40;

const EMPTY_LIST_NOTICE: &str = "You don't have any words added yet! 📭";

/// Integer ceiling division; 0 words is 0 pages (callers short-circuit to the
/// empty notice before rendering).
pub fn total_pages(count: usize, page_size: usize) -> usize {
    (count + page_size - 1) / page_size
}

pub async fn open_delete_browser(
    db: &Database,
    user_id: UserId,
    page_size: usize,
) -> Result<Reply, sqlx::Error> {
    let count = words::count_words(db, user_id, None).await? as usize;
    if count == 0 {
        return Ok(Reply::with_main_menu(EMPTY_LIST_NOTICE));
    }

    let page_words = words::list_page(db, user_id, 0, page_size as i64).await?;
    Ok(delete_page_reply(&page_words, 0, count, page_size))
}

pub async fn delete_browser_page(
    db: &Database,
    user_id: UserId,
    page: usize,
    page_size: usize,
) -> Result<Reply, sqlx::Error> {
    let count = words::count_words(db, user_id, None).await? as usize;
    let page_words =
        words::list_page(db, user_id, (page * page_size) as i64, page_size as i64).await?;
    if page_words.is_empty() {
        return Ok(Reply::text("Words not found."));
    }
    Ok(delete_page_reply(&page_words, page, count, page_size))
}

pub fn confirm_delete_reply(word_id: WordId) -> Reply {
    Reply::with_buttons(
        "❓ Are you sure you want to delete this word?",
        vec![vec![
            Button::new("✅ Yes, delete", CallbackToken::ConfirmDelete(word_id)),
            Button::new("❌ No", CallbackToken::CancelDelete),
        ]],
    )
}

pub async fn perform_delete(
    db: &Database,
    user_id: UserId,
    word_id: WordId,
) -> Result<Reply, sqlx::Error> {
    if words::delete_word(db, user_id, word_id).await? {
        Ok(Reply::text("✅ Word deleted!"))
    } else {
        Ok(Reply::text("❌ Failed to delete word."))
    }
}

/// "No" on the confirm step: back to the first browser page, re-counting
/// first in case the list emptied meanwhile.
pub async fn return_to_delete_browser(
    db: &Database,
    user_id: UserId,
    page_size: usize,
) -> Result<Reply, sqlx::Error> {
    let count = words::count_words(db, user_id, None).await? as usize;
    if count == 0 {
        return Ok(Reply::text("You have no more words to delete! 📭"));
    }

    let page_words = words::list_page(db, user_id, 0, page_size as i64).await?;
    Ok(delete_page_reply(&page_words, 0, count, page_size))
}

pub async fn open_viewer(
    db: &Database,
    user_id: UserId,
    page_size: usize,
) -> Result<Reply, sqlx::Error> {
    let count = words::count_words(db, user_id, None).await? as usize;
    if count == 0 {
        return Ok(Reply::with_main_menu(EMPTY_LIST_NOTICE));
    }

    let page_words = words::list_page(db, user_id, 0, page_size as i64).await?;
    Ok(viewer_page_reply(&page_words, 0, count, page_size))
}

pub async fn viewer_page(
    db: &Database,
    user_id: UserId,
    page: usize,
    page_size: usize,
) -> Result<Reply, sqlx::Error> {
    let count = words::count_words(db, user_id, None).await? as usize;
    let page_words =
        words::list_page(db, user_id, (page * page_size) as i64, page_size as i64).await?;
    if page_words.is_empty() {
        return Ok(Reply::text("Words not found."));
    }
    Ok(viewer_page_reply(&page_words, page, count, page_size))
}

fn word_button_label(word: &Word) -> String {
    let label = match &word.entry {
        WordEntry::Translation { source, target } => format!("🔤 {source} — {target}"),
        WordEntry::IrregularVerb {
            from_form, to_form, ..
        } => format!("📖 {from_form} → {to_form}"),
    };
    truncate_label(label, MAX_BUTTON_LABEL_CHARS)
}

fn truncate_label(label: String, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label;
    }
    let head: String = label.chars().take(max_chars - 3).collect();
    format!("{head}...")
}

fn delete_page_reply(page_words: &[Word], page: usize, count: usize, page_size: usize) -> Reply {
    let pages = total_pages(count, page_size);

    let mut rows: Vec<Vec<Button>> = page_words
        .iter()
        .map(|word| vec![Button::new(word_button_label(word), CallbackToken::DeleteWord(word.id))])
        .collect();

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(Button::new("⬅️ Back", CallbackToken::DeletePage(page - 1)));
    }
    if page + 1 < pages {
        nav.push(Button::new("Forward ➡️", CallbackToken::DeletePage(page + 1)));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(vec![Button::new("❌ Close", CallbackToken::CloseDelete)]);

    let text = if pages > 1 {
        format!("🗑 Choose a word to delete:\nPage {}/{}", page + 1, pages)
    } else {
        "🗑 Choose a word to delete:".to_string()
    };

    Reply::with_buttons(text, rows)
}

fn viewer_page_reply(page_words: &[Word], page: usize, count: usize, page_size: usize) -> Reply {
    let pages = total_pages(count, page_size);

    let lines: Vec<String> = page_words
        .iter()
        .enumerate()
        .map(|(offset, word)| {
            let number = page * page_size + offset + 1;
            match &word.entry {
                WordEntry::Translation { source, target } => {
                    format!("{number}. 🔤 {source} — {target}")
                }
                WordEntry::IrregularVerb {
                    from_form, to_form, ..
                } => format!("{number}. 📖 {from_form} → {to_form}"),
            }
        })
        .collect();

    let text = format!(
        "📚 Your words:\n\n🔤 — translation\n📖 — irregular verb\n\n{}\n\n📄 {}/{}",
        lines.join("\n"),
        page + 1,
        pages
    );

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(Button::new("⬅️ Back", CallbackToken::ViewPage(page - 1)));
    }
    if page + 1 < pages {
        nav.push(Button::new("Forward ➡️", CallbackToken::ViewPage(page + 1)));
    }

    let mut rows = Vec::new();
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(vec![Button::new("❌ Close", CallbackToken::CloseView)]);

    Reply::with_buttons(text, rows)
}
