use nq_core::NewsArticle;

/// Characters of each article body included in the prompt.
pub const MAX_ARTICLE_CHARS: usize = 2000;

const ARTICLE_SEPARATOR: &str = "\n\n---\n\n";

pub fn render_article(index: usize, article: &NewsArticle) -> String {
    let content: String = article.content.chars().take(MAX_ARTICLE_CHARS).collect();
    format!(
        "[Article {}]\nTitle: {}\nSource: {}\nContent: {}\nURL: {}",
        index + 1,
        article.title,
        article.source,
        content,
        article.url
    )
}

pub fn build_prompt(question: &str, articles: &[NewsArticle]) -> String {
    let context = articles
        .iter()
        .enumerate()
        .map(|(i, article)| render_article(i, article))
        .collect::<Vec<_>>()
        .join(ARTICLE_SEPARATOR);

    format!(
        "You are a helpful AI crypto journalist with access to the latest cryptocurrency news. \
Answer the user's question naturally and conversationally based on the information below.

IMPORTANT: Do NOT mention that you received articles, documents, or any sources. \
Answer as if you naturally know this information. You may mention specific news sources \
(like \"According to The Defiant\") when citing information, but never mention receiving articles or documents.

If the information below doesn't contain enough details to answer the question, \
simply say you don't have enough information about that topic.

Recent crypto news information:

{}

Question: {}

Answer:",
        context, question
    )
}
