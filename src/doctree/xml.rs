//! Docutils-XML doctree reader.
//!
//! Reads the XML serialization produced by the docutils XML writer into a
//! [`Doctree`]. Elements outside the closed [`Kind`] set are kept as
//! [`Kind::Unknown`] nodes with their raw element name recorded, so the
//! translator can report them instead of the reader failing.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{Doctree, Kind, NodeId};
use crate::error::{Error, Result};

/// Parse a docutils-XML document into a [`Doctree`].
///
/// The top-level `<document>` element maps onto the doctree's implicit
/// root. Whitespace-only text between structural elements (pretty-printer
/// indentation) is discarded; text inside inline-bearing elements is kept
/// verbatim.
///
/// # Example
///
/// ```
/// let xml = r#"<document>
///     <paragraph>Hello <emphasis>there</emphasis>.</paragraph>
/// </document>"#;
///
/// let doc = doctyp::doctree::parse_xml(xml)?;
/// assert_eq!(doctyp::translate(&doc).to_text(), "Hello #emph[\n  there\n].");
/// # Ok::<(), doctyp::Error>(())
/// ```
pub fn parse_xml(content: &str) -> Result<Doctree> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);

    let mut doc = Doctree::new();
    let mut stack: Vec<NodeId> = vec![doc.root()];
    let mut pending = String::new();
    let mut document_seen = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut doc, &stack, &mut pending)?;

                let name = e.name();
                let local = local_name(name.as_ref());
                let element = std::str::from_utf8(local)?.to_string();
                let kind = Kind::from_element_name(&element);

                // The root <document> element reuses the implicit root node.
                let id = if kind == Kind::Document && !document_seen && stack.len() == 1 {
                    document_seen = true;
                    doc.root()
                } else {
                    let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                    doc.add_element(parent, kind)
                };

                if kind == Kind::Unknown {
                    doc.attrs.set_element(id, &element);
                }
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = std::str::from_utf8(local_name(attr.key.as_ref()))?.to_string();
                    let value = attr.unescape_value()?;
                    doc.attrs.set_attr(id, &key, &value);
                }

                stack.push(id);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut doc, &stack, &mut pending)?;

                let name = e.name();
                let local = local_name(name.as_ref());
                let element = std::str::from_utf8(local)?.to_string();
                let kind = Kind::from_element_name(&element);

                let parent = *stack.last().unwrap_or(&NodeId::ROOT);
                let id = doc.add_element(parent, kind);

                if kind == Kind::Unknown {
                    doc.attrs.set_element(id, &element);
                }
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = std::str::from_utf8(local_name(attr.key.as_ref()))?.to_string();
                    let value = attr.unescape_value()?;
                    doc.attrs.set_attr(id, &key, &value);
                }
            }
            Ok(Event::Text(e)) => {
                pending.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(e)) => {
                pending.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    pending.push_str(&resolved);
                }
            }
            Ok(Event::End(_)) => {
                flush_text(&mut doc, &stack, &mut pending)?;
                if stack.len() > 1 {
                    stack.pop();
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    flush_text(&mut doc, &stack, &mut pending)?;
    Ok(doc)
}

/// Attach accumulated character data to the current parent.
///
/// Whitespace-only runs under structural containers are pretty-printer
/// indentation, not content, and are dropped. Everything else is kept
/// verbatim, including whitespace runs between inline elements.
/// Non-whitespace text outside any element is an error.
fn flush_text(doc: &mut Doctree, stack: &[NodeId], pending: &mut String) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let parent = *stack.last().unwrap_or(&NodeId::ROOT);
    let parent_kind = doc.node(parent).map(|n| n.kind).unwrap_or(Kind::Document);
    if structural(parent_kind) && pending.trim().is_empty() {
        pending.clear();
        return Ok(());
    }
    if stack.len() == 1 {
        return Err(Error::MalformedDoctree(
            "text outside the document element".to_string(),
        ));
    }
    doc.add_text(parent, pending);
    pending.clear();
    Ok(())
}

/// Whether a kind holds only element children, never significant text.
fn structural(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Document
            | Kind::Section
            | Kind::Topic
            | Kind::Sidebar
            | Kind::BulletList
            | Kind::EnumeratedList
            | Kind::ListItem
            | Kind::DefinitionList
            | Kind::DefinitionListItem
            | Kind::Definition
            | Kind::FieldList
            | Kind::Field
            | Kind::FieldBody
            | Kind::Docinfo
            | Kind::Authors
            | Kind::LineBlock
            | Kind::BlockQuote
            | Kind::Table
            | Kind::TableGroup
            | Kind::TableHead
            | Kind::TableBody
            | Kind::Row
            | Kind::Entry
            | Kind::Figure
            | Kind::Legend
            | Kind::Footnote
            | Kind::Citation
            | Kind::Admonition
            | Kind::Attention
            | Kind::Caution
            | Kind::Danger
            | Kind::Error
            | Kind::Hint
            | Kind::Important
            | Kind::Note
            | Kind::Tip
            | Kind::Warning
            | Kind::SeeAlso
            | Kind::Transition
            | Kind::ColSpec
            | Kind::Image
            | Kind::SystemMessage
            | Kind::Pending
    )
}

/// Extract local name from a namespaced XML name (e.g., "docutils:raw" -> "raw").
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_document() {
        let xml = r#"<?xml version="1.0"?>
<document source="index.rst">
    <section ids="overview">
        <title>Overview</title>
        <paragraph>Hello world.</paragraph>
    </section>
</document>"#;

        let doc = parse_xml(xml).unwrap();

        let root = doc.node(doc.root()).unwrap();
        assert_eq!(root.kind, Kind::Document);

        let sections: Vec<_> = doc.children(doc.root()).collect();
        assert_eq!(sections.len(), 1);
        let section = sections[0];
        assert_eq!(doc.node(section).unwrap().kind, Kind::Section);
        assert_eq!(doc.attrs.id(section), Some("overview"));

        let kinds: Vec<Kind> = doc
            .children(section)
            .map(|id| doc.node(id).unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![Kind::Title, Kind::Paragraph]);
        assert_eq!(doc.collect_text(section), "OverviewHello world.");
    }

    #[test]
    fn test_parse_inline_whitespace_preserved() {
        let xml = r#"<document>
    <paragraph>see <reference refuri="https://example.com/">here</reference> for more</paragraph>
</document>"#;

        let doc = parse_xml(xml).unwrap();
        let para = doc.children(doc.root()).next().unwrap();

        let kinds: Vec<Kind> = doc
            .children(para)
            .map(|id| doc.node(id).unwrap().kind)
            .collect();
        assert_eq!(kinds, vec![Kind::Text, Kind::Reference, Kind::Text]);
        assert_eq!(doc.collect_text(para), "see here for more");

        let reference = doc.children(para).nth(1).unwrap();
        assert_eq!(doc.attrs.refuri(reference), Some("https://example.com/"));
    }

    #[test]
    fn test_parse_attributes() {
        let xml = r#"<document>
    <target ids="spot other-name"/>
    <image uri="img/logo.png" width="320px" alt="The logo"/>
    <table>
        <tgroup cols="2">
            <colspec colwidth="50"/>
            <colspec colwidth="50"/>
        </tgroup>
    </table>
</document>"#;

        let doc = parse_xml(xml).unwrap();
        let children: Vec<_> = doc.children(doc.root()).collect();
        let (target, image, table) = (children[0], children[1], children[2]);

        assert_eq!(doc.node(target).unwrap().kind, Kind::Target);
        assert_eq!(doc.attrs.id(target), Some("spot"));

        assert_eq!(doc.node(image).unwrap().kind, Kind::Image);
        assert_eq!(doc.attrs.uri(image), Some("img/logo.png"));
        assert_eq!(doc.attrs.width(image), Some("320px"));
        assert_eq!(doc.attrs.alt(image), Some("The logo"));

        let tgroup = doc.children(table).next().unwrap();
        assert_eq!(doc.node(tgroup).unwrap().kind, Kind::TableGroup);
        assert_eq!(doc.attrs.cols(tgroup), Some(2));
    }

    #[test]
    fn test_parse_entities() {
        let xml = "<document><paragraph>q &amp; a &#x2019;s &lt;tag&gt;</paragraph></document>";

        let doc = parse_xml(xml).unwrap();
        let para = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.collect_text(para), "q & a \u{2019}s <tag>");
    }

    #[test]
    fn test_parse_entity_in_attribute() {
        let xml = r#"<document><reference refuri="https://example.com/?a=1&amp;b=2">x</reference></document>"#;

        let doc = parse_xml(xml).unwrap();
        let reference = doc.children(doc.root()).next().unwrap();
        assert_eq!(
            doc.attrs.refuri(reference),
            Some("https://example.com/?a=1&b=2")
        );
    }

    #[test]
    fn test_parse_unknown_element() {
        let xml = r#"<document><toctree maxdepth="2"/></document>"#;

        let doc = parse_xml(xml).unwrap();
        let node = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.node(node).unwrap().kind, Kind::Unknown);
        assert_eq!(doc.attrs.element(node), Some("toctree"));
    }

    #[test]
    fn test_parse_raw_content_verbatim() {
        let xml = "<document><raw format=\"typst\">#pagebreak()\n</raw></document>";

        let doc = parse_xml(xml).unwrap();
        let raw = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.node(raw).unwrap().kind, Kind::Raw);
        assert_eq!(doc.attrs.format(raw), Some("typst"));
        assert_eq!(doc.collect_text(raw), "#pagebreak()\n");
    }

    #[test]
    fn test_parse_literal_block() {
        let xml = "<document><literal_block language=\"python\">print(\"hi\")\nprint(\"yo\")</literal_block></document>";

        let doc = parse_xml(xml).unwrap();
        let block = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.node(block).unwrap().kind, Kind::LiteralBlock);
        assert_eq!(doc.attrs.language(block), Some("python"));
        assert_eq!(doc.collect_text(block), "print(\"hi\")\nprint(\"yo\")");
    }

    #[test]
    fn test_parse_mismatched_tags_is_error() {
        assert!(parse_xml("<document><section></document>").is_err());
    }

    #[test]
    fn test_stray_text_outside_document_is_error() {
        assert!(parse_xml("stray text").is_err());
        assert!(parse_xml("stray<document/>").is_err());
        // Leading whitespace and declarations are fine.
        assert!(parse_xml("\n<document><paragraph>Ok.</paragraph></document>\n").is_ok());
    }
}
