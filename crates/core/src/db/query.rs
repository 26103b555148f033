//! Filtered listing query
//!
//! The listing is the only query whose shape depends on user input: the
//! search box and the three checkboxes decide which conditions appear.
//! Values never reach the SQL text; each one becomes a positional
//! parameter.

use super::prompts::Prompt;

const SELECT_PROMPTS: &str =
    "SELECT id, title, prompt, is_favorite, created_at, updated_at FROM prompts";

const ORDER_BY: &str = " ORDER BY is_favorite DESC, updated_at DESC, id DESC";

/// Listing filters as selected on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptFilter {
    pub search: String,
    pub in_title: bool,
    pub in_prompt: bool,
    pub favorites_only: bool,
}

/// SQL text plus its positional parameters, in `$n` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl PromptFilter {
    /// Trimmed search text, `None` when there is nothing to search for
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Columns the search applies to. Unchecking both means "search everywhere".
    fn columns(&self) -> (bool, bool) {
        if !self.in_title && !self.in_prompt {
            (true, true)
        } else {
            (self.in_title, self.in_prompt)
        }
    }

    /// In-memory equivalent of the SQL built by [`build_list_query`]
    pub fn matches(&self, prompt: &Prompt) -> bool {
        if self.favorites_only && !prompt.is_favorite {
            return false;
        }

        let Some(term) = self.search_term() else {
            return true;
        };
        let needle = term.to_lowercase();
        let (in_title, in_prompt) = self.columns();

        (in_title && prompt.title.to_lowercase().contains(&needle))
            || (in_prompt && prompt.prompt.to_lowercase().contains(&needle))
    }
}

/// Build the listing query for the given filters
pub fn build_list_query(filter: &PromptFilter) -> ListQuery {
    let mut conditions: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        let (in_title, in_prompt) = filter.columns();
        let mut alternatives = Vec::new();

        for (column, enabled) in [("title", in_title), ("prompt", in_prompt)] {
            if enabled {
                params.push(pattern.clone());
                alternatives.push(format!("{} ILIKE ${}", column, params.len()));
            }
        }

        conditions.push(format!("({})", alternatives.join(" OR ")));
    }

    if filter.favorites_only {
        conditions.push("is_favorite = TRUE".to_string());
    }

    let mut sql = String::from(SELECT_PROMPTS);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(ORDER_BY);

    ListQuery { sql, params }
}

/// Escape LIKE wildcards so user text matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn prompt(title: &str, text: &str, favorite: bool) -> Prompt {
        let ts = NaiveDateTime::default();
        Prompt {
            id: 1,
            title: title.into(),
            prompt: text.into(),
            is_favorite: favorite,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_no_filters() {
        let q = build_list_query(&PromptFilter::default());
        assert_eq!(
            q.sql,
            "SELECT id, title, prompt, is_favorite, created_at, updated_at FROM prompts \
             ORDER BY is_favorite DESC, updated_at DESC, id DESC"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_blank_search_adds_nothing() {
        let filter = PromptFilter {
            search: "   ".into(),
            in_title: true,
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_search_defaults_to_both_columns() {
        let filter = PromptFilter {
            search: " rust ".into(),
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert!(q.sql.contains("WHERE (title ILIKE $1 OR prompt ILIKE $2)"));
        assert_eq!(q.params, vec!["%rust%", "%rust%"]);
    }

    #[test]
    fn test_search_title_only() {
        let filter = PromptFilter {
            search: "rust".into(),
            in_title: true,
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert!(q.sql.contains("WHERE (title ILIKE $1)"));
        assert!(!q.sql.contains("prompt ILIKE"));
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn test_search_prompt_only_with_favorites() {
        let filter = PromptFilter {
            search: "rust".into(),
            in_prompt: true,
            favorites_only: true,
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert!(q
            .sql
            .contains("WHERE (prompt ILIKE $1) AND is_favorite = TRUE ORDER BY"));
        assert_eq!(q.params, vec!["%rust%"]);
    }

    #[test]
    fn test_favorites_only() {
        let filter = PromptFilter {
            favorites_only: true,
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert!(q.sql.contains("WHERE is_favorite = TRUE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_wildcards_are_escaped() {
        let filter = PromptFilter {
            search: r"50%_off\".into(),
            ..Default::default()
        };
        let q = build_list_query(&filter);
        assert_eq!(q.params[0], r"%50\%\_off\\%");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let p = prompt("Rust Review", "Review this code", false);
        let filter = PromptFilter {
            search: "rUST".into(),
            ..Default::default()
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_matches_respects_columns() {
        let p = prompt("Email", "Write a polite reply", false);
        let title_only = PromptFilter {
            search: "polite".into(),
            in_title: true,
            ..Default::default()
        };
        assert!(!title_only.matches(&p));

        let prompt_only = PromptFilter {
            in_title: false,
            in_prompt: true,
            ..title_only
        };
        assert!(prompt_only.matches(&p));
    }

    #[test]
    fn test_matches_favorites_only() {
        let filter = PromptFilter {
            favorites_only: true,
            ..Default::default()
        };
        assert!(filter.matches(&prompt("a", "b", true)));
        assert!(!filter.matches(&prompt("a", "b", false)));
    }

    #[test]
    fn test_matches_wildcards_literally() {
        let filter = PromptFilter {
            search: "%".into(),
            ..Default::default()
        };
        assert!(!filter.matches(&prompt("plain", "text", false)));
        assert!(filter.matches(&prompt("100% sure", "text", false)));
    }
}
