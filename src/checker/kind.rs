//! Identifiers and default endpoints of the built-in backends

use std::fmt;

/// The closed set of backends shipped with lingocheck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Pusan National University Korean speller (HTML)
    Pusan,
    /// Daum Korean grammar checker (HTML)
    Daum,
    /// Enno Japanese checker
    Enno,
    /// Manfen Chinese grammar checker
    Manfen,
    /// rechtschreibpruefung24 German checker
    Rechtschreibung24,
    /// pr-cy.ru Russian checker
    Prcy,
    /// GrammarBot English checker
    GrammarBot,
    /// LanguageTool public API, the multilingual fallback
    LanguageTool,
}

impl BackendKind {
    pub fn all() -> &'static [BackendKind] {
        &[
            BackendKind::Pusan,
            BackendKind::Daum,
            BackendKind::Enno,
            BackendKind::Manfen,
            BackendKind::Rechtschreibung24,
            BackendKind::Prcy,
            BackendKind::GrammarBot,
            BackendKind::LanguageTool,
        ]
    }

    /// Backend id used by language profiles
    pub fn id(&self) -> &'static str {
        match self {
            BackendKind::Pusan => "pusan",
            BackendKind::Daum => "daum",
            BackendKind::Enno => "enno",
            BackendKind::Manfen => "manfen",
            BackendKind::Rechtschreibung24 => "rechtschreibung24",
            BackendKind::Prcy => "prcy",
            BackendKind::GrammarBot => "grammarbot",
            BackendKind::LanguageTool => "languagetool",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.id() == id)
    }

    /// Full URL the adapter posts to unless overridden
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            BackendKind::Pusan => "http://speller.cs.pusan.ac.kr/results",
            BackendKind::Daum => "https://dic.daum.net/grammar_checker.do",
            BackendKind::Enno => "https://enno.jp/api/check",
            BackendKind::Manfen => "https://zh.manfenyufa.com/api/check",
            BackendKind::Rechtschreibung24 => "https://rechtschreibpruefung24.de/api/check",
            BackendKind::Prcy => "https://pr-cy.ru/api/grammar-check",
            BackendKind::GrammarBot => "http://api.grammarbot.io/v2/check",
            BackendKind::LanguageTool => "https://api.languagetool.org/v2/check",
        }
    }

    /// Environment variable that overrides the endpoint
    pub fn endpoint_env_var(&self) -> String {
        format!("LINGOCHECK_{}_URL", self.id().to_ascii_uppercase())
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
