use larkdown_renderer::{
    ATTRIBUTION, Block, BlockKind, BoxError, CalloutStyle, Diagnostic, DocumentRenderer, ImageRef,
    MediaOptions, RenderOptions, ResolvedMedia, RunStyle, TableProperty, TextBody, TextElement,
    TextRun, TokenResolver, render_document,
};
use pretty_assertions::assert_eq;

fn source(blocks: Vec<Block>) -> impl Iterator<Item = Result<Block, BoxError>> {
    blocks.into_iter().map(Ok)
}

fn page(children: &[&str]) -> Block {
    Block::new("doc", BlockKind::Page(TextBody::plain("Title"))).with_children(children.iter().copied())
}

fn text(id: &str, content: &str) -> Block {
    Block::new(id, BlockKind::Text(TextBody::plain(content))).with_parent("doc")
}

fn render(blocks: Vec<Block>) -> String {
    render_with(blocks, RenderOptions::default())
}

fn render_with(blocks: Vec<Block>, options: RenderOptions) -> String {
    render_document(source(blocks), &TokenResolver, options)
        .unwrap()
        .markdown
}

/// Rendered body without the title line and footer.
fn body(markdown: &str) -> &str {
    markdown
        .strip_prefix("# Title\n\n")
        .and_then(|rest| rest.strip_suffix(&format!("\n\n{ATTRIBUTION}\n")))
        .unwrap()
}

#[test]
fn test_page_then_text() {
    let markdown = render(vec![page(&["t"]), text("t", "Hello")]);
    assert_eq!(markdown, format!("# Title\n\nHello\n\n{ATTRIBUTION}\n"));
}

#[test]
fn test_uniform_style_has_one_delimiter_pair() {
    let body_text = TextBody::from_runs([
        TextRun::styled("one ", RunStyle::bold()),
        TextRun::styled("two ", RunStyle::bold()),
        TextRun::styled("three", RunStyle::bold()),
    ]);
    let markdown = render(vec![page(&["t"]), Block::new("t", BlockKind::Text(body_text))]);

    assert_eq!(body(&markdown), "**one two three**");
}

#[test]
fn test_headings_seven_to_nine_clamp_to_six() {
    let headings: Vec<Block> = (7..=9)
        .map(|level| {
            Block::new(
                format!("h{level}"),
                BlockKind::Heading {
                    level,
                    body: TextBody::plain(format!("Level {level}")),
                },
            )
        })
        .collect();
    let mut blocks = vec![page(&["h7", "h8", "h9"])];
    blocks.extend(headings);

    let markdown = render(blocks);

    assert_eq!(
        body(&markdown),
        "###### Level 7\n\n###### Level 8\n\n###### Level 9"
    );
}

#[test]
fn test_two_by_two_table() {
    let mut blocks = vec![
        page(&["table"]),
        Block::new(
            "table",
            BlockKind::Table(Some(TableProperty {
                rows: 2,
                columns: 2,
            })),
        )
        .with_children(["c0", "c1", "c2", "c3"]),
    ];
    for (index, content) in ["Header 1", "Header 2", "Cell 3", "Cell 4"].iter().enumerate() {
        blocks.push(Block::new(format!("c{index}"), BlockKind::TableCell).with_children([format!("x{index}")]));
        blocks.push(text(&format!("x{index}"), content));
    }

    let markdown = render(blocks);
    let table = body(&markdown);
    let rows: Vec<&str> = table.lines().collect();

    assert_eq!(rows, vec!["|Header 1|Header 2|", "|-|-|", "|Cell 3|Cell 4|"]);
    for row in rows {
        assert_eq!(row.matches('|').count(), 3);
    }
}

#[test]
fn test_quote_container_lines() {
    let markdown = render(vec![
        page(&["qc"]),
        Block::new("qc", BlockKind::QuoteContainer).with_children(["a", "b", "c"]),
        text("a", "first"),
        text("b", "second"),
        text("c", "third"),
    ]);

    assert_eq!(
        body(&markdown),
        "> first\n>\n> second\n>\n> third\n>"
    );
}

#[test]
fn test_callout_without_color_has_no_quote() {
    let options = RenderOptions {
        use_admonition_style: true,
        ..RenderOptions::default()
    };
    let markdown = render_with(
        vec![
            page(&["callout"]),
            Block::new(
                "callout",
                BlockKind::Callout(CalloutStyle {
                    emoji_id: "bulb".to_owned(),
                    background_color: None,
                }),
            )
            .with_children(["a", "b"]),
            text("a", "Remember this"),
            text("b", "And this"),
        ],
        options,
    );

    assert_eq!(body(&markdown), "💡 Remember this\n\nAnd this");
    assert!(markdown.lines().all(|line| !line.starts_with('>')));
}

#[test]
fn test_unknown_type_is_placeholder() {
    let document = DocumentRenderer::default()
        .render(
            source(vec![page(&["u"]), Block::new("u", BlockKind::Unsupported(99))]),
            &TokenResolver,
        )
        .unwrap();

    assert_eq!(body(&document.markdown), "<!-- unsupported block type: 99 -->");
    assert_eq!(
        document.diagnostics,
        vec![Diagnostic::UnknownBlockType {
            id: "u".to_owned(),
            code: 99,
        }]
    );
}

#[test]
fn test_link_is_percent_decoded() {
    let body_text = TextBody {
        elements: vec![TextElement::Run(TextRun::styled(
            "x",
            RunStyle::link("https%3A%2F%2Fa.com"),
        ))],
        ..TextBody::default()
    };
    let markdown = render(vec![page(&["t"]), Block::new("t", BlockKind::Text(body_text))]);

    assert_eq!(body(&markdown), "[x](https://a.com)");
}

#[test]
fn test_mirrored_images_are_written_to_media_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let options = RenderOptions {
        media: MediaOptions {
            dir: tmp.path().join("static"),
            url_prefix: "static".to_owned(),
            as_remote_url: false,
            html_img: true,
        },
        use_admonition_style: false,
    };
    let resolver = |image: &ImageRef, options: &MediaOptions| -> Result<ResolvedMedia, BoxError> {
        assert!(options.mirror_dir().is_some());
        Ok(ResolvedMedia::Download {
            bytes: b"png".to_vec(),
            file_name: format!("{}.png", image.token),
        })
    };
    let blocks = vec![
        page(&["img"]),
        Block::new(
            "img",
            BlockKind::Image(ImageRef {
                token: "boxcnabc".to_owned(),
                width: 320,
                height: 200,
            }),
        ),
    ];

    let document = DocumentRenderer::new(options)
        .render(source(blocks), &resolver)
        .unwrap();

    assert_eq!(
        body(&document.markdown),
        r#"<img src="static/boxcnabc.png" width="320" height="200"/>"#
    );
    assert_eq!(
        std::fs::read(tmp.path().join("static/boxcnabc.png")).unwrap(),
        b"png"
    );
}

#[test]
fn test_nested_document() {
    let markdown = render(vec![
        page(&["h", "list", "code", "div", "todo"]),
        Block::new(
            "h",
            BlockKind::Heading {
                level: 2,
                body: TextBody::plain("Setup"),
            },
        ),
        Block::new("list", BlockKind::Bullet(TextBody::plain("Install"))).with_children(["sub"]),
        Block::new("sub", BlockKind::Bullet(TextBody::plain("cargo install larkdown"))),
        Block::new(
            "code",
            BlockKind::Code {
                language: Some(7),
                body: TextBody::plain("larkdown convert doxcn123"),
            },
        ),
        Block::new("div", BlockKind::Divider),
        Block::new(
            "todo",
            BlockKind::Todo {
                done: false,
                body: TextBody::plain("Write docs"),
            },
        ),
    ]);

    assert_eq!(
        body(&markdown),
        "## Setup\n\n\
         - Install\n  - cargo install larkdown\n\n\
         ```bash\nlarkdown convert doxcn123\n```\n\n\
         ---\n\n\
         - [ ] Write docs"
    );
}
