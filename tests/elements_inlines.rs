//! Inline elements parsed end to end
//!
//! Documents go through the full pipeline so link references defined anywhere in
//! the document are visible to every paragraph.

use marktree::testing::assert_ast;
use marktree::{parse, parse_inline, Inline, ReferenceMap};

#[test]
fn test_strong_followed_by_text() {
    let root = parse("**bold** text");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(2)
            .inline(0, |inline| {
                inline.assert_strong().child_count(1).child(0, |child| {
                    child.assert_text().text("bold");
                });
            })
            .inline(1, |inline| {
                inline.assert_text().text(" text");
            });
    });
}

#[test]
fn test_emphasis_inside_strong() {
    let root = parse("__strong *and em*__");
    assert_ast(&root).block(0, |block| {
        block.assert_paragraph().inline_count(1).inline(0, |inline| {
            inline
                .assert_strong()
                .child_count(2)
                .child(1, |child| {
                    child.assert_emphasis().text("and em");
                });
        });
    });
}

#[test]
fn test_intraword_underscores_stay_literal() {
    let root = parse("foo_bar_baz");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(1)
            .inline(0, |inline| {
                inline.assert_text().text("foo_bar_baz");
            });
    });
}

#[test]
fn test_unmatched_delimiters_stay_literal() {
    let root = parse("2 * 3 and a_b");
    assert_ast(&root).block(0, |block| {
        block.assert_paragraph().inline_count(1).text("2 * 3 and a_b");
    });
}

#[test]
fn test_full_reference_link() {
    let root = parse("[text][ref]\n\n[ref]: /url \"title\"");
    assert_ast(&root).block_count(1).block(0, |block| {
        block.assert_paragraph().inline_count(1).inline(0, |inline| {
            inline
                .assert_link()
                .url("/url")
                .title(Some("title"))
                .child_count(1)
                .child(0, |child| {
                    child.assert_text().text("text");
                });
        });
    });
}

#[test]
fn test_reference_labels_are_case_insensitive() {
    let root = parse("See [The   Docs].\n\n[the docs]: https://example.com");
    assert_ast(&root).block(0, |block| {
        block.assert_paragraph().inline(1, |inline| {
            inline
                .assert_link()
                .url("https://example.com")
                .title(None)
                .text("The   Docs");
        });
    });
}

#[test]
fn test_inline_link_and_image() {
    let root = parse("[a *b*](/dest 'T') and ![alt **x**](img.png)");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(3)
            .inline(0, |inline| {
                inline
                    .assert_link()
                    .url("/dest")
                    .title(Some("T"))
                    .child_count(2)
                    .child(1, |child| {
                        child.assert_emphasis().text("b");
                    });
            })
            .inline(1, |inline| {
                inline.assert_text().text(" and ");
            })
            .inline(2, |inline| {
                inline.assert_image().url("img.png").title(None).text("alt x");
            });
    });
}

#[test]
fn test_unresolved_reference_is_literal() {
    let root = parse("[missing] and [x][nope]");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(1)
            .text("[missing] and [x][nope]");
    });
}

#[test]
fn test_code_span_hides_markup() {
    let root = parse("use `*not em*` here");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(3)
            .inline(1, |inline| {
                inline.assert_inline_code().text("*not em*");
            });
    });
}

#[test]
fn test_hard_breaks() {
    let root = parse("spaces  \nbackslash\\\nend");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(5)
            .inline(0, |inline| {
                inline.assert_text().text("spaces");
            })
            .inline(1, |inline| {
                inline.assert_break();
            })
            .inline(2, |inline| {
                inline.assert_text().text("backslash");
            })
            .inline(3, |inline| {
                inline.assert_break();
            })
            .inline(4, |inline| {
                inline.assert_text().text("end");
            });
    });
}

#[test]
fn test_entities_and_escapes() {
    let root = parse("&copy; &#65; &bogus; \\*lit\\*");
    assert_ast(&root).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(1)
            .text("\u{a9} A &bogus; *lit*");
    });
}

#[test]
fn test_heading_content_is_resolved() {
    let root = parse("## A *b*");
    assert_ast(&root).block(0, |block| {
        block.assert_heading().depth(2).inline(1, |inline| {
            inline.assert_emphasis().text("b");
        });
    });
}

#[test]
fn test_parse_inline_empty() {
    assert!(parse_inline("", &ReferenceMap::new(), None).is_empty());
}

#[test]
fn test_parse_inline_is_repeatable() {
    let refs = ReferenceMap::new();
    let text = "*a* **b** `c` [d](/e) f_g_h";
    let first = parse_inline(text, &refs, None);
    let second = parse_inline(text, &refs, None);
    assert_eq!(first, second);
    assert!(matches!(first[0], Inline::Emphasis(_)));
}

#[test]
fn test_failed_inline_target_stays_literal() {
    let root = parse("[foo](bad\n\n[foo]: /url");
    assert_ast(&root).block_count(1).block(0, |block| {
        block
            .assert_paragraph()
            .inline_count(1)
            .text("[foo](bad")
            .inline(0, |inline| {
                inline.assert_text();
            });
    });
}

#[test]
fn test_deeply_nested_emphasis_parses() {
    let levels = 5000;
    let source = format!("{}x{}", "*a ".repeat(levels), " b*".repeat(levels));
    let root = parse(&source);
    assert_ast(&root).block_count(1).block(0, |block| {
        block
            .assert_paragraph()
            .text_starts_with("*a *a ")
            .text_contains("a x b");
    });
    assert!(serde_json::to_string(&root).is_ok());
}
