//! Tests for TypeScript and JavaScript parser

#[cfg(test)]
mod parser_tests {
    use crate::parser;
    use swc_common::comments::Comments;
    use swc_common::{sync::Lrc, SourceMap};
    use swc_ecma_ast::Program;

    fn parse_test(src: &str, filename: &str) -> Result<parser::ParsedSource, anyhow::Error> {
        let cm: Lrc<SourceMap> = Default::default();
        parser::parse_source(src, &cm, filename)
    }

    #[test]
    fn test_parse_simple_function_typescript() {
        let src = "function foo() { return 42; }";
        let result = parse_test(src, "test.ts");
        assert!(result.is_ok(), "Should parse simple TypeScript function");
    }

    #[test]
    fn test_parse_typescript_types() {
        let src = "function foo(x: number): number { return x * 2; }";
        let result = parse_test(src, "test.ts");
        assert!(result.is_ok(), "Should parse TypeScript types");
    }

    #[test]
    fn test_parse_rejects_jsx_in_plain_typescript() {
        let src = "function foo() { return <div>hello</div>; }";
        let result = parse_test(src, "test.ts");
        assert!(
            result.is_err(),
            "JSX syntax should cause parse error in .ts files (use .tsx instead)"
        );
    }

    #[test]
    fn test_parse_accepts_jsx_in_javascript() {
        let src = "function foo() { return <div>hello</div>; }";
        assert!(parse_test(src, "test.js").is_ok());
        assert!(parse_test(src, "test.jsx").is_ok());
        assert!(parse_test(src, "test.tsx").is_ok());
    }

    #[test]
    fn test_parse_decorators() {
        let src = r#"
            class Service {
                @memoize
                load() { return 1; }
            }
        "#;
        assert!(parse_test(src, "service.ts").is_ok());
        assert!(parse_test(src, "service.js").is_ok());
    }

    #[test]
    fn test_parse_top_level_return_in_javascript() {
        let src = "if (done) return;\nfunction next() {}";
        let result = parse_test(src, "script.js");
        assert!(result.is_ok(), "Top-level return should be tolerated");
    }

    #[test]
    fn test_parse_commonjs_as_script() {
        let src = "module.exports.run = function () { return 1; };";
        let parsed = parse_test(src, "legacy.cjs").unwrap();
        assert!(matches!(parsed.program, Program::Script(_)));
    }

    #[test]
    fn test_parse_esm_as_module() {
        let src = "export function run() { return 1; }";
        let parsed = parse_test(src, "modern.mjs").unwrap();
        assert!(matches!(parsed.program, Program::Module(_)));
    }

    #[test]
    fn test_parse_collects_comments() {
        let src = "/** Doubles. */\nfunction double(x) { return x * 2; }";
        let parsed = parse_test(src, "test.js").unwrap();
        let leading = parsed
            .comments
            .get_leading(program_start(&parsed.program))
            .expect("doc comment should lead the declaration");
        assert_eq!(leading.len(), 1);
        assert_eq!(&*leading[0].text, "* Doubles. ");
    }

    #[test]
    fn test_parse_error_reports_file() {
        let src = "function foo() { return }}}";
        let err = parse_test(src, "broken.ts").err().expect("should fail");
        let message = format!("{:#}", err);
        assert!(message.contains("broken.ts"), "got: {}", message);
        assert!(message.contains("Parse error"), "got: {}", message);
    }

    #[test]
    fn test_parse_unknown_extension_as_javascript() {
        let src = "const run = () => 1;";
        assert!(parse_test(src, "Jakefile").is_ok());
    }

    fn program_start(program: &Program) -> swc_common::BytePos {
        use swc_common::Spanned;
        match program {
            Program::Module(module) => module.body[0].span().lo,
            Program::Script(script) => script.body[0].span().lo,
        }
    }
}
