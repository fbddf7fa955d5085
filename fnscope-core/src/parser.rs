//! TypeScript and JavaScript parser using SWC
//!
//! Global invariants enforced:
//! - Parser settings depend only on the file name
//! - Recoverable syntax errors never abort parsing
//! - Comments are collected alongside the tree so callers can attach them to nodes

use crate::language::Language;
use anyhow::Result;
use std::path::Path;
use swc_common::comments::SingleThreadedComments;
use swc_common::{sync::Lrc, FileName, SourceFile, SourceMap};
use swc_ecma_ast::{EsVersion, Program};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// A parsed file: the program tree plus the comments the lexer saw
pub struct ParsedSource {
    pub program: Program,
    pub comments: SingleThreadedComments,
}

/// Determine the appropriate syntax configuration for a dialect
///
/// Every dialect gets decorators; JavaScript additionally gets the permissive
/// options (top-level `return`, decorators before `export`, import attributes).
fn syntax_for_language(language: Language) -> Syntax {
    if language.is_typescript() {
        Syntax::Typescript(TsSyntax {
            tsx: language.allows_jsx(),
            decorators: true,
            dts: language == Language::TypeScriptDeclaration,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: language.allows_jsx(),
            decorators: true,
            decorators_before_export: true,
            import_attributes: true,
            allow_return_outside_function: true,
            ..Default::default()
        })
    }
}

/// Parse TypeScript, JavaScript, JSX, or TSX source code into a program tree
///
/// The dialect is picked from the file extension; unknown extensions are
/// parsed as JavaScript. The program is parsed as a module or a script,
/// whichever the source turns out to be.
///
/// Returns an error only for unrecoverable parse errors.
pub fn parse_source(
    src: &str,
    source_map: &Lrc<SourceMap>,
    filename: &str,
) -> Result<ParsedSource> {
    let language = Language::from_path_or_default(Path::new(filename));
    let syntax = syntax_for_language(language);

    let source_file: Lrc<SourceFile> = source_map.new_source_file(
        FileName::Custom(filename.into()).into(),
        src.to_string(),
    );

    let comments = SingleThreadedComments::default();
    let program = {
        let input = StringInput::from(&*source_file);
        let lexer = Lexer::new(syntax, EsVersion::EsNext, input, Some(&comments));
        let mut parser = Parser::new_from(lexer);

        let result = parser.parse_program();
        for recovered in parser.take_errors() {
            tracing::debug!(
                file = filename,
                language = language.name(),
                "recovered from syntax error: {}",
                recovered.kind().msg()
            );
        }

        result.map_err(|e| {
            anyhow::anyhow!("Parse error: {}", e.kind().msg())
                .context(format!("Failed to parse source file: {}", filename))
        })?
    };

    Ok(ParsedSource { program, comments })
}

#[cfg(test)]
#[path = "parser/tests.rs"]
mod tests;
