#![cfg(test)]

use css_syntax::{Declaration, Node, declarations_in, parse_stylesheet, parse_stylesheet_from};
use std::path::Path;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn serializes_untouched_sheets_verbatim() {
    init_logger();
    let sources = [
        "h1 { margin: 0 0 20px; font-size: 32px; line-height: 1.2; letter-spacing: 1px; }",
        ".rule { font-size: 15px }",
        ".rule { font-size: 16px; font-size: 32rpx; }",
        "@media (min-width: 500px) { .rule { font-size: 16px } }",
        "@import url(\"a.css\");\n/* header */\n.a{color:red}\n",
        ".rule { content: '16px'; font-family: \"16px\"; font-size: 16px; }",
        ".rule { background: url(16px.jpg); width: calc(100% - 14PX) !important ; }",
        ":root { --rpx-14px: 14px; } .rule { font-size: var(--rpx-14px); }",
        "@font-face { font-family: x; src: url(a.woff) }\n\n",
        "a { b: c;; d: e }",
        "",
    ];
    for source in sources {
        assert_eq!(parse_stylesheet(source).to_css(), source);
    }
}

#[test]
fn exposes_rules_and_declarations() {
    init_logger();
    let sheet = parse_stylesheet(".a, .b { margin: 0 0 20px; color: red !important }");
    assert_eq!(sheet.nodes.len(), 1);
    let Some(Node::Rule(rule)) = sheet.nodes.first() else {
        panic!("expected a rule");
    };
    assert_eq!(rule.selector, ".a, .b");
    let decls: Vec<&Declaration> = declarations_in(&rule.nodes).collect();
    assert_eq!(decls.len(), 2);
    assert_eq!(decls[0].property, "margin");
    assert_eq!(decls[0].value, "0 0 20px");
    assert!(!decls[0].important);
    assert_eq!(decls[1].property, "color");
    assert_eq!(decls[1].value, "red");
    assert!(decls[1].important);
    assert!(!rule.raws.semicolon);
}

#[test]
fn parses_media_block_children() {
    init_logger();
    let sheet = parse_stylesheet("@media (min-width: 500px) { .rule { font-size: 16px } }");
    let Some(Node::AtRule(media)) = sheet.nodes.first() else {
        panic!("expected an at-rule");
    };
    assert_eq!(media.name, "media");
    assert_eq!(media.params, "(min-width: 500px)");
    let children = media.nodes.as_ref().map_or(0, Vec::len);
    assert_eq!(children, 1);
}

#[test]
fn blockless_at_rule_and_comment_nodes() {
    init_logger();
    let sheet = parse_stylesheet("@charset \"utf-8\"; /* note */ a { }");
    assert!(matches!(&sheet.nodes[0], Node::AtRule(at) if at.nodes.is_none() && at.params == "\"utf-8\""));
    assert!(matches!(&sheet.nodes[1], Node::Comment(comment) if comment.text == "/* note */"));
    assert!(matches!(&sheet.nodes[2], Node::Rule(rule) if rule.selector == "a"));
}

#[test]
fn inserted_clone_is_terminated_like_its_neighbours() {
    init_logger();
    let mut sheet = parse_stylesheet(".rule { font-size: 15px }");
    let Some(Node::Rule(rule)) = sheet.nodes.first_mut() else {
        panic!("expected a rule");
    };
    let Some(Node::Declaration(original)) = rule.nodes.first() else {
        panic!("expected a declaration");
    };
    let clone = original.cloned_with_value("30rpx");
    rule.nodes.push(Node::Declaration(clone));
    assert_eq!(sheet.to_css(), ".rule { font-size: 15px; font-size: 30rpx }");
}

#[test]
fn function_value_closing_a_block_is_kept_whole() {
    init_logger();
    let sheet = parse_stylesheet(".a{width:calc(100% - 20px)}");
    let Some(Node::Rule(rule)) = sheet.nodes.first() else {
        panic!("expected a rule");
    };
    let decls: Vec<&Declaration> = declarations_in(&rule.nodes).collect();
    assert_eq!(decls[0].value, "calc(100% - 20px)");
    assert_eq!(sheet.to_css(), ".a{width:calc(100% - 20px)}");
}

#[test]
fn function_value_before_semicolon_is_kept_whole() {
    init_logger();
    let sheet = parse_stylesheet(".rule { font-size: var(--rpx-14px); margin: fn([1px]) ; }");
    let Some(Node::Rule(rule)) = sheet.nodes.first() else {
        panic!("expected a rule");
    };
    let values: Vec<&str> = declarations_in(&rule.nodes)
        .map(|decl| decl.value.as_str())
        .collect();
    assert_eq!(values, ["var(--rpx-14px)", "fn([1px])"]);
}

#[test]
fn at_rule_prelude_block_followed_by_brace() {
    init_logger();
    let css = "@media (min-width:500px){.a{font-size:16px}}@import url(\"a.css\");";
    let sheet = parse_stylesheet(css);
    let Some(Node::AtRule(media)) = sheet.nodes.first() else {
        panic!("expected an at-rule");
    };
    assert_eq!(media.params, "(min-width:500px)");
    assert_eq!(media.nodes.as_ref().map_or(0, Vec::len), 1);
    let Some(Node::AtRule(import)) = sheet.nodes.get(1) else {
        panic!("expected an at-rule");
    };
    assert_eq!(import.params, "url(\"a.css\")");
    assert_eq!(sheet.to_css(), css);
}

#[test]
fn remembers_source_path() {
    init_logger();
    let sheet = parse_stylesheet_from("a { b: c }", Some(Path::new("styles/main.css")));
    assert_eq!(sheet.source(), Some(Path::new("styles/main.css")));
    assert_eq!(parse_stylesheet("a { b: c }").source(), None);
}
