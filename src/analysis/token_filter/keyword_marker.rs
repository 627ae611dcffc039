//! Keyword marker filter.
//!
//! Flags tokens whose text is in a fixed set so later filters leave them
//! alone. [`DictionaryCompoundWordFilter`](super::compound::DictionaryCompoundWordFilter)
//! never splits a keyword.

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Marks tokens found in a keyword set as keywords.
#[derive(Clone, Debug, Default)]
pub struct KeywordMarkerFilter {
    keywords: AHashSet<String>,
    ignore_case: bool,
}

impl KeywordMarkerFilter {
    /// Create a case-sensitive marker for `keywords`.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ignore_case: false,
        }
    }

    /// Match keywords without regard to case.
    pub fn ignore_case(mut self) -> Self {
        self.keywords = self.keywords.iter().map(|k| k.to_lowercase()).collect();
        self.ignore_case = true;
        self
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        if self.ignore_case {
            self.keywords.contains(&text.to_lowercase())
        } else {
            self.keywords.contains(text)
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let marked = tokens
            .map(|token| {
                if !token.is_keyword() && self.is_keyword(&token.text) {
                    token.mark_keyword()
                } else {
                    token
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(marked.into_iter()))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}
