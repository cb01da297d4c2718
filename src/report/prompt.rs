//! Prompt construction
//!
//! Turns a [`Corpus`] into a bounded prompt for the summarizer. Every section
//! is cut to a fixed size so that the prompt length does not grow with the
//! site:
//! - text is cut to a character prefix
//! - links and images are cut to a count
//! - tables are cut to a count, and each table to a character prefix
//!
//! Sets iterate in lexicographic order, so the same corpus always yields
//! the same prompt.

use crate::config::PromptLimits;
use crate::crawler::Corpus;
use std::collections::BTreeSet;

/// Builds the summarization prompt for a crawl of `seed`
///
/// # Arguments
///
/// * `corpus` - The aggregated crawl result
/// * `seed` - The seed URL, named in the instructions
/// * `limits` - Section size limits
///
/// # Returns
///
/// The prompt text. Truncated sections are marked: `...` after cut text,
/// `...and N more` after cut lists, `... (N more tables not shown)` after
/// the last shown table.
pub fn build_prompt(corpus: &Corpus, seed: &str, limits: &PromptLimits) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Analyze the following data scraped from {} and its subpages. \
         Provide a concise summary of the main topics, list key links/images, \
         and summarize any tabular data found.\n",
        seed
    ));

    let text = corpus.all_text.trim();
    let (text_prefix, text_cut) = truncate_chars(text, limits.text_chars);
    prompt.push_str(&format!(
        "\nExtracted Text Summary (first {} chars):\n{}{}\n",
        limits.text_chars,
        text_prefix,
        if text_cut { "..." } else { "" }
    ));

    push_list(&mut prompt, "Key Links Found", &corpus.all_links, limits.max_links);
    push_list(
        &mut prompt,
        "Image Sources Found",
        &corpus.all_images,
        limits.max_images,
    );

    let tables = &corpus.all_tables;
    prompt.push_str(&format!("\nTables Found ({} total):\n", tables.len()));
    for (i, table) in tables.iter().take(limits.max_tables).enumerate() {
        let (prefix, cut) = truncate_chars(table.trim_end(), limits.table_chars);
        prompt.push_str(&format!(
            "\n--- Table {} ---\n{}{}\n",
            i + 1,
            prefix,
            if cut { "..." } else { "" }
        ));
    }
    if tables.len() > limits.max_tables {
        prompt.push_str(&format!(
            "... ({} more tables not shown)\n",
            tables.len() - limits.max_tables
        ));
    }

    prompt
}

fn push_list(prompt: &mut String, title: &str, items: &BTreeSet<String>, max: usize) {
    prompt.push_str(&format!("\n{} ({} total):\n", title, items.len()));
    for item in items.iter().take(max) {
        prompt.push_str(&format!("- {}\n", item));
    }
    if items.len() > max {
        prompt.push_str(&format!("...and {} more\n", items.len() - max));
    }
}

/// Returns the first `max_chars` characters of `s` and whether anything was cut
fn truncate_chars(s: &str, max_chars: usize) -> (&str, bool) {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => (&s[..idx], true),
        None => (s, false),
    }
}
