//! Per-kind Typst serialization.
//!
//! Every node kind renders through one pure function taking the node's own
//! payload plus the already-rendered text of its children. No templating
//! engine and no output-tree mutation: the functions here only build
//! strings, which keeps each construct testable in isolation.

use super::escape::{calculate_fence_length, escape_str, indent_tail};
use super::{Content, NodeId, NodeKind};

/// Render one node from its payload and its children's rendered text.
pub(crate) fn render_node(content: &Content, id: NodeId, children: &[String]) -> String {
    let Some(node) = content.node(id) else {
        return String::new();
    };

    match &node.kind {
        NodeKind::Document | NodeKind::Section => children.join("\n\n"),
        NodeKind::Paragraph => children.concat(),
        NodeKind::Heading { depth, label } => render_heading(*depth, label.as_deref(), children),
        NodeKind::BulletList | NodeKind::NumberedList => render_list(content, id, children),
        NodeKind::Table { columns } => render_table(*columns, children),
        NodeKind::Quote { attribution } => render_quote(attribution.as_deref(), children),
        NodeKind::Emphasis => render_functional("emph", children),
        NodeKind::Strong => render_functional("strong", children),
        NodeKind::Subscript => render_functional("sub", children),
        NodeKind::Superscript => render_functional("super", children),
        NodeKind::Raw { content } => render_raw(content),
        NodeKind::RawBlock { language, content } => {
            render_raw_block(language.as_deref(), content)
        }
        NodeKind::Source { content } => content.clone(),
        NodeKind::Image { uri, width, alt } => {
            render_image(uri, width.as_deref(), alt.as_deref())
        }
        NodeKind::Figure => render_figure(children),
        NodeKind::Link { uri } => render_link(uri, children),
        NodeKind::Text { content } => content.clone(),
    }
}

fn render_heading(depth: u32, label: Option<&str>, children: &[String]) -> String {
    let content = children.first().map(String::as_str).unwrap_or("");
    let body = match label {
        Some(label) => format!("{content} <{label}>"),
        None => content.to_string(),
    };
    format!("#heading(\n  level: {depth},\n  [{body}]\n)")
}

/// Render a list, applying the nested-list continuation rules.
///
/// A child that is itself a list is emitted unwrapped and without a comma
/// before it, so it reads as a continuation of the preceding item; its own
/// marker is `+` instead of `#`. All other children are bracket-wrapped
/// items separated by commas, with no trailing comma.
fn render_list(content: &Content, id: NodeId, children: &[String]) -> String {
    let Some(node) = content.node(id) else {
        return String::new();
    };

    let parent_is_list = node
        .parent
        .and_then(|p| content.node(p))
        .map(|p| p.kind.is_list())
        .unwrap_or(false);
    let prefix = if parent_is_list { "+" } else { "#" };

    let mut out = format!("{prefix}{}(", node.kind.list_funcname());
    for (i, (child_id, rendered)) in content.children(id).zip(children).enumerate() {
        let nested = content
            .node(child_id)
            .map(|n| n.kind.is_list())
            .unwrap_or(false);
        let (text, delimiter) = if nested {
            (rendered.clone(), "")
        } else {
            (format!("[\n  {}\n]", indent_tail(rendered, 2)), ",")
        };
        if i > 0 {
            out.push_str(delimiter);
        }
        out.push_str("\n  ");
        out.push_str(&indent_tail(&text, 2));
    }
    out.push_str("\n)");
    out
}

fn render_table(columns: u32, children: &[String]) -> String {
    let mut out = format!("#table(\n  columns: {columns},");
    for (i, cell) in children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str("\n  [\n    ");
        out.push_str(&indent_tail(cell, 4));
        out.push_str("\n  ]");
    }
    out.push_str("\n)");
    out
}

fn render_quote(attribution: Option<&str>, children: &[String]) -> String {
    let mut out = String::from("#quote(\n  block: true,");
    if let Some(attribution) = attribution {
        out.push_str("\n  attribution: [");
        out.push_str(attribution);
        out.push_str("],");
    }
    out.push_str("\n)[");
    for child in children {
        out.push_str("\n  ");
        out.push_str(&indent_tail(child, 2));
    }
    out.push_str("\n]");
    out
}

/// Shared rendering for the functional-text family (`#emph[...]` and kin).
///
/// New members supply only a label token.
fn render_functional(label: &str, children: &[String]) -> String {
    let mut out = format!("#{label}[");
    for child in children {
        out.push_str("\n  ");
        out.push_str(&indent_tail(child, 2));
    }
    out.push_str("\n]");
    out
}

fn render_raw(content: &str) -> String {
    format!("#raw(\n  \"{}\"\n)", escape_str(content))
}

fn render_raw_block(language: Option<&str>, content: &str) -> String {
    let fence = "`".repeat(calculate_fence_length(content, '`'));
    match language {
        Some(language) => format!("{fence}{language}\n{content}\n{fence}"),
        None => format!("{fence}\n{content}\n{fence}"),
    }
}

fn render_image(uri: &str, width: Option<&str>, alt: Option<&str>) -> String {
    let mut out = format!("#image(\"{}\"", escape_str(uri));
    if let Some(width) = width {
        out.push_str(", width: ");
        out.push_str(width);
    }
    if let Some(alt) = alt {
        out.push_str(&format!(", alt: \"{}\"", escape_str(alt)));
    }
    out.push(')');
    out
}

fn render_figure(children: &[String]) -> String {
    let mut out = String::from("#figure(");
    if let Some(first) = children.first() {
        out.push_str("\n  [\n    ");
        out.push_str(&indent_tail(first, 4));
        out.push_str("\n  ],");
    }
    let caption: String = children.iter().skip(1).map(String::as_str).collect();
    if !caption.is_empty() {
        out.push_str("\n  caption: [\n    ");
        out.push_str(&indent_tail(&caption, 4));
        out.push_str("\n  ],");
    }
    out.push_str("\n)");
    out
}

fn render_link(uri: &str, children: &[String]) -> String {
    let display = if children.is_empty() {
        uri.to_string()
    } else {
        children.concat()
    };
    format!(
        "#link(\n  \"{}\",\n  [\n    {}\n  ],\n)",
        escape_str(uri),
        indent_tail(&display, 4)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_text(content: &mut Content, parent: NodeId, s: &str) -> NodeId {
        content.push(
            parent,
            NodeKind::Text {
                content: s.to_string(),
            },
        )
    }

    #[test]
    fn test_heading() {
        let mut content = Content::new();
        let heading = content.push(
            content.root(),
            NodeKind::Heading {
                depth: 1,
                label: None,
            },
        );
        push_text(&mut content, heading, "Title");

        assert_eq!(content.render(heading), "#heading(\n  level: 1,\n  [Title]\n)");
    }

    #[test]
    fn test_heading_with_label() {
        let mut content = Content::new();
        let heading = content.push(
            content.root(),
            NodeKind::Heading {
                depth: 2,
                label: Some("intro".into()),
            },
        );
        push_text(&mut content, heading, "Introduction");

        assert_eq!(
            content.render(heading),
            "#heading(\n  level: 2,\n  [Introduction <intro>]\n)"
        );
    }

    #[test]
    fn test_empty_heading() {
        let mut content = Content::new();
        let heading = content.push(
            content.root(),
            NodeKind::Heading {
                depth: 1,
                label: None,
            },
        );

        assert_eq!(content.render(heading), "#heading(\n  level: 1,\n  []\n)");
    }

    #[test]
    fn test_bullet_list() {
        let mut content = Content::new();
        let list = content.push(content.root(), NodeKind::BulletList);
        push_text(&mut content, list, "Item A");
        push_text(&mut content, list, "Item B");

        let expected = "\
#list(
  [
    Item A
  ],
  [
    Item B
  ]
)";
        assert_eq!(content.render(list), expected);
    }

    #[test]
    fn test_bullet_list_multiline_item() {
        let mut content = Content::new();
        let list = content.push(content.root(), NodeKind::BulletList);
        push_text(&mut content, list, "Item A\nNext line");
        push_text(&mut content, list, "Item B");

        let expected = "\
#list(
  [
    Item A
    Next line
  ],
  [
    Item B
  ]
)";
        assert_eq!(content.render(list), expected);
    }

    #[test]
    fn test_nested_bullet_list() {
        let mut content = Content::new();
        let outer = content.push(content.root(), NodeKind::BulletList);
        push_text(&mut content, outer, "Item A");
        let inner = content.push(outer, NodeKind::BulletList);
        push_text(&mut content, inner, "Sub item A");
        push_text(&mut content, inner, "Sub item B");
        push_text(&mut content, outer, "Item B");

        let expected = "\
#list(
  [
    Item A
  ]
  +list(
    [
      Sub item A
    ],
    [
      Sub item B
    ]
  ),
  [
    Item B
  ]
)";
        assert_eq!(content.render(outer), expected);
    }

    #[test]
    fn test_numbered_list_nested_in_bullet_list() {
        let mut content = Content::new();
        let outer = content.push(content.root(), NodeKind::BulletList);
        push_text(&mut content, outer, "Item A");
        let inner = content.push(outer, NodeKind::NumberedList);
        push_text(&mut content, inner, "Sub item A");
        push_text(&mut content, inner, "Sub item B");
        push_text(&mut content, outer, "Item B");

        let expected = "\
#list(
  [
    Item A
  ]
  +enum(
    [
      Sub item A
    ],
    [
      Sub item B
    ]
  ),
  [
    Item B
  ]
)";
        assert_eq!(content.render(outer), expected);
    }

    #[test]
    fn test_numbered_list() {
        let mut content = Content::new();
        let list = content.push(content.root(), NodeKind::NumberedList);
        push_text(&mut content, list, "Item A");
        push_text(&mut content, list, "Item B");

        let expected = "\
#enum(
  [
    Item A
  ],
  [
    Item B
  ]
)";
        assert_eq!(content.render(list), expected);
    }

    #[test]
    fn test_table() {
        let mut content = Content::new();
        let table = content.push(content.root(), NodeKind::Table { columns: 2 });
        push_text(&mut content, table, "Language");
        push_text(&mut content, table, "Japanese");
        push_text(&mut content, table, "Description");
        push_text(&mut content, table, "Hello world\nThis is a test.");

        let expected = "\
#table(
  columns: 2,
  [
    Language
  ],
  [
    Japanese
  ],
  [
    Description
  ],
  [
    Hello world
    This is a test.
  ]
)";
        assert_eq!(content.render(table), expected);
    }

    #[test]
    fn test_table_custom_columns() {
        let mut content = Content::new();
        let table = content.push(content.root(), NodeKind::Table { columns: 3 });
        push_text(&mut content, table, "a");

        assert!(content.render(table).starts_with("#table(\n  columns: 3,"));
    }

    #[test]
    fn test_quote_without_attribution() {
        let mut content = Content::new();
        let quote = content.push(
            content.root(),
            NodeKind::Quote { attribution: None },
        );
        push_text(&mut content, quote, "Quoted text.");

        let expected = "\
#quote(
  block: true,
)[
  Quoted text.
]";
        assert_eq!(content.render(quote), expected);
    }

    #[test]
    fn test_quote_with_attribution() {
        let mut content = Content::new();
        let quote = content.push(
            content.root(),
            NodeKind::Quote {
                attribution: Some("Someone".into()),
            },
        );
        push_text(&mut content, quote, "Quoted text.");

        let expected = "\
#quote(
  block: true,
  attribution: [Someone],
)[
  Quoted text.
]";
        assert_eq!(content.render(quote), expected);
    }

    #[test]
    fn test_functional_text() {
        let mut content = Content::new();
        let emph = content.push(content.root(), NodeKind::Emphasis);
        push_text(&mut content, emph, "Content");
        assert_eq!(content.render(emph), "#emph[\n  Content\n]");

        let strong = content.push(content.root(), NodeKind::Strong);
        push_text(&mut content, strong, "Content");
        assert_eq!(content.render(strong), "#strong[\n  Content\n]");

        let sub = content.push(content.root(), NodeKind::Subscript);
        push_text(&mut content, sub, "2");
        assert_eq!(content.render(sub), "#sub[\n  2\n]");

        let sup = content.push(content.root(), NodeKind::Superscript);
        push_text(&mut content, sup, "n");
        assert_eq!(content.render(sup), "#super[\n  n\n]");
    }

    #[test]
    fn test_inline_mix_in_paragraph() {
        let mut content = Content::new();
        let para = content.push(content.root(), NodeKind::Paragraph);
        push_text(&mut content, para, "This ");
        let emph = content.push(para, NodeKind::Emphasis);
        push_text(&mut content, emph, "is");
        push_text(&mut content, para, " ");
        let strong = content.push(para, NodeKind::Strong);
        push_text(&mut content, strong, "content");

        let expected = "This #emph[\n  is\n] #strong[\n  content\n]";
        assert_eq!(content.render(para), expected);
    }

    #[test]
    fn test_raw_escapes_string_literal() {
        let mut content = Content::new();
        let raw = content.push(
            content.root(),
            NodeKind::Raw {
                content: "print(\"テスト\")".into(),
            },
        );

        assert_eq!(
            content.render(raw),
            "#raw(\n  \"print(\\\"テスト\\\")\"\n)"
        );
    }

    #[test]
    fn test_raw_block() {
        let mut content = Content::new();
        let block = content.push(
            content.root(),
            NodeKind::RawBlock {
                language: Some("python".into()),
                content: "print(\"hi\")\nprint(\"yo\")".into(),
            },
        );

        assert_eq!(
            content.render(block),
            "```python\nprint(\"hi\")\nprint(\"yo\")\n```"
        );
    }

    #[test]
    fn test_raw_block_fence_grows_past_content() {
        let mut content = Content::new();
        let block = content.push(
            content.root(),
            NodeKind::RawBlock {
                language: None,
                content: "``` not a fence".into(),
            },
        );

        assert_eq!(content.render(block), "````\n``` not a fence\n````");
    }

    #[test]
    fn test_source_is_verbatim() {
        let mut content = Content::new();
        let source = content.push(
            content.root(),
            NodeKind::Source {
                content: "#heading([Hello])\n".into(),
            },
        );

        assert_eq!(content.render(source), "#heading([Hello])\n");
    }

    #[test]
    fn test_image_minimal() {
        let mut content = Content::new();
        let image = content.push(
            content.root(),
            NodeKind::Image {
                uri: "img/logo.png".into(),
                width: None,
                alt: None,
            },
        );

        assert_eq!(content.render(image), "#image(\"img/logo.png\")");
    }

    #[test]
    fn test_image_with_width_and_alt() {
        let mut content = Content::new();
        let image = content.push(
            content.root(),
            NodeKind::Image {
                uri: "img/logo.png".into(),
                width: Some("80%".into()),
                alt: Some("The logo".into()),
            },
        );

        assert_eq!(
            content.render(image),
            "#image(\"img/logo.png\", width: 80%, alt: \"The logo\")"
        );
    }

    #[test]
    fn test_figure_with_caption() {
        let mut content = Content::new();
        let figure = content.push(content.root(), NodeKind::Figure);
        content.push(
            figure,
            NodeKind::Image {
                uri: "chart.png".into(),
                width: None,
                alt: None,
            },
        );
        push_text(&mut content, figure, "Quarterly results");

        let expected = "\
#figure(
  [
    #image(\"chart.png\")
  ],
  caption: [
    Quarterly results
  ],
)";
        assert_eq!(content.render(figure), expected);
    }

    #[test]
    fn test_figure_without_caption() {
        let mut content = Content::new();
        let figure = content.push(content.root(), NodeKind::Figure);
        content.push(
            figure,
            NodeKind::Image {
                uri: "chart.png".into(),
                width: None,
                alt: None,
            },
        );

        let expected = "\
#figure(
  [
    #image(\"chart.png\")
  ],
)";
        assert_eq!(content.render(figure), expected);
    }

    #[test]
    fn test_link_with_display_text() {
        let mut content = Content::new();
        let link = content.push(
            content.root(),
            NodeKind::Link {
                uri: "http://example.com".into(),
            },
        );
        push_text(&mut content, link, "EXAMPLE.COM");

        let expected = "\
#link(
  \"http://example.com\",
  [
    EXAMPLE.COM
  ],
)";
        assert_eq!(content.render(link), expected);
    }

    #[test]
    fn test_link_display_defaults_to_uri() {
        let mut content = Content::new();
        let link = content.push(
            content.root(),
            NodeKind::Link {
                uri: "http://example.com".into(),
            },
        );

        let expected = "\
#link(
  \"http://example.com\",
  [
    http://example.com
  ],
)";
        assert_eq!(content.render(link), expected);
    }

    #[test]
    fn test_section_joins_blocks_with_blank_line() {
        let mut content = Content::new();
        let section = content.push(content.root(), NodeKind::Section);
        let heading = content.push(
            section,
            NodeKind::Heading {
                depth: 1,
                label: None,
            },
        );
        push_text(&mut content, heading, "Title");
        let para = content.push(section, NodeKind::Paragraph);
        push_text(&mut content, para, "Body text.");

        let expected = "#heading(\n  level: 1,\n  [Title]\n)\n\nBody text.";
        assert_eq!(content.render(section), expected);
    }
}
