//! Dialect detection from file extensions

use std::path::Path;

/// ECMAScript dialects the parser distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript declaration file (.d.ts, .d.mts, .d.cts)
    TypeScriptDeclaration,
    /// TypeScript with JSX (.tsx, .mtsx, .ctsx)
    TypeScriptReact,
    /// JavaScript (.js, .mjs, .cjs)
    JavaScript,
    /// JavaScript with JSX (.jsx, .mjsx, .cjsx)
    JavaScriptReact,
}

impl Language {
    /// Detect language from file extension
    ///
    /// Returns `None` if the extension is not recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Language::TypeScript),
            "tsx" | "mtsx" | "ctsx" => Some(Language::TypeScriptReact),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "jsx" | "mjsx" | "cjsx" => Some(Language::JavaScriptReact),
            _ => None,
        }
    }

    /// Detect language from a file name or path
    ///
    /// Declaration files are told apart from plain TypeScript by their `.d.` infix.
    pub fn from_path(path: &Path) -> Option<Self> {
        let language = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)?;

        let is_declaration = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.ends_with(".d"));

        if language == Language::TypeScript && is_declaration {
            Some(Language::TypeScriptDeclaration)
        } else {
            Some(language)
        }
    }

    /// Detect language, falling back to JavaScript for unknown extensions
    pub fn from_path_or_default(path: &Path) -> Self {
        Self::from_path(path).unwrap_or(Language::JavaScript)
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::TypeScriptDeclaration => "TypeScript Declaration",
            Language::TypeScriptReact => "TypeScript React",
            Language::JavaScript => "JavaScript",
            Language::JavaScriptReact => "JavaScript React",
        }
    }

    /// Check if this is a TypeScript variant
    pub fn is_typescript(&self) -> bool {
        matches!(
            self,
            Language::TypeScript | Language::TypeScriptDeclaration | Language::TypeScriptReact
        )
    }

    /// Check if JSX syntax should be accepted
    ///
    /// Plain JavaScript accepts JSX as well; plain TypeScript cannot, since
    /// `<T>expr` casts would be ambiguous.
    pub fn allows_jsx(&self) -> bool {
        matches!(
            self,
            Language::TypeScriptReact | Language::JavaScript | Language::JavaScriptReact
        )
    }
}
