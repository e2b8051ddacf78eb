//! Input node kinds and their generalization chain.

/// Element kind of a doctree node.
///
/// This is a closed enum over the docutils element set the translator knows
/// about. Dispatch never inspects type names at runtime: each kind reports
/// its nearest generalization via [`Kind::base`], and handler lookup walks
/// that chain from most specific to least specific (mirroring how the
/// upstream framework dispatches along a node's class hierarchy).
///
/// Elements outside this set map to [`Kind::Unknown`] and degrade with a
/// diagnostic instead of failing the translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// Root element of a parsed document.
    Document,
    /// Structural division; nesting depth drives rendered heading levels.
    Section,
    /// Heading text of a section (or of a document, when promoted).
    Title,
    /// Thematic break (`<transition/>`).
    Transition,
    /// Free-floating titled block (`<topic>`).
    Topic,
    /// Tangential container (`<sidebar>`).
    Sidebar,
    /// Informal heading outside the section hierarchy.
    Rubric,

    /// Block-level text container.
    Paragraph,
    /// Unordered list.
    BulletList,
    /// Ordered list.
    EnumeratedList,
    /// Item of either list variety.
    ListItem,
    DefinitionList,
    DefinitionListItem,
    Term,
    Definition,
    /// Name/value field container (`<field_list>`).
    FieldList,
    Field,
    FieldName,
    FieldBody,
    /// Bibliographic header block (`<docinfo>`).
    Docinfo,
    Author,
    Authors,
    Organization,
    Contact,
    Address,
    Version,
    Revision,
    Status,
    Date,
    Copyright,

    /// Verbatim block (`<literal_block>`); `language` attribute optional.
    LiteralBlock,
    /// Interactive-session block; generalizes to [`Kind::LiteralBlock`].
    DoctestBlock,
    LineBlock,
    Line,
    /// Quotation block, optionally closed by an [`Kind::Attribution`].
    BlockQuote,
    /// Trailing attribution of a block quote.
    Attribution,

    Table,
    /// Column-bearing table subdivision (`<tgroup cols="N">`).
    TableGroup,
    /// Column geometry declaration (`<colspec>`); leaf.
    ColSpec,
    TableHead,
    TableBody,
    Row,
    Entry,

    Figure,
    Caption,
    Legend,
    /// Image reference; `uri`/`width`/`alt` attributes.
    Image,

    /// Format-tagged verbatim pass-through (`<raw format="...">`).
    Raw,
    /// Anchor declaration (`<target>`); leaf.
    Target,
    /// Display math; unsupported, dropped with a diagnostic.
    MathBlock,
    Footnote,
    Citation,

    /// Generic admonition; also the generalization of the named family.
    Admonition,
    Attention,
    Caution,
    Danger,
    Error,
    Hint,
    Important,
    Note,
    Tip,
    Warning,
    /// Sphinx `seealso`; part of the admonition family.
    SeeAlso,

    /// Leaf text run. Carries a range into the doctree text buffer.
    #[default]
    Text,
    Emphasis,
    Strong,
    /// Inline verbatim (`<literal>`).
    Literal,
    /// Hyperlink (`<reference refuri="...">`); internal refs are transparent.
    Reference,
    FootnoteReference,
    CitationReference,
    Subscript,
    Superscript,
    /// Citation-style emphasis (`<title_reference>`).
    TitleReference,
    Abbreviation,
    Acronym,
    /// Generic inline wrapper (`<inline>`).
    Inline,
    /// Parser-generated text such as section numbers.
    Generated,
    /// Inline math; unsupported, dropped with a diagnostic.
    Math,
    /// Wrapper the parser places around markup it could not resolve.
    Problematic,

    /// Invisible: never rendered, skipped without diagnostics.
    Comment,
    /// Invisible: substitution definition body.
    SubstitutionDefinition,
    /// Invisible: parser-reported message node.
    SystemMessage,
    /// Invisible: deferred transform placeholder.
    Pending,

    /// Any element outside the closed set above.
    Unknown,
}

impl Kind {
    /// The nearest generalization of this kind, if any.
    ///
    /// Handler lookup walks this chain most-specific-first, so a kind
    /// without its own handler inherits the behavior of its base: the named
    /// admonitions all degrade through [`Kind::Admonition`], and doctest
    /// blocks render through [`Kind::LiteralBlock`].
    pub fn base(self) -> Option<Kind> {
        match self {
            Kind::Attention
            | Kind::Caution
            | Kind::Danger
            | Kind::Error
            | Kind::Hint
            | Kind::Important
            | Kind::Note
            | Kind::Tip
            | Kind::Warning
            | Kind::SeeAlso => Some(Kind::Admonition),
            Kind::DoctestBlock => Some(Kind::LiteralBlock),
            _ => None,
        }
    }

    /// Whether this kind is one of docutils' invisible elements.
    ///
    /// Invisible elements carry processing data, not content; they are
    /// skipped silently rather than reported as unsupported.
    pub fn is_invisible(self) -> bool {
        matches!(
            self,
            Kind::Comment | Kind::SubstitutionDefinition | Kind::SystemMessage | Kind::Pending
        )
    }

    /// The docutils element name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Document => "document",
            Kind::Section => "section",
            Kind::Title => "title",
            Kind::Transition => "transition",
            Kind::Topic => "topic",
            Kind::Sidebar => "sidebar",
            Kind::Rubric => "rubric",
            Kind::Paragraph => "paragraph",
            Kind::BulletList => "bullet_list",
            Kind::EnumeratedList => "enumerated_list",
            Kind::ListItem => "list_item",
            Kind::DefinitionList => "definition_list",
            Kind::DefinitionListItem => "definition_list_item",
            Kind::Term => "term",
            Kind::Definition => "definition",
            Kind::FieldList => "field_list",
            Kind::Field => "field",
            Kind::FieldName => "field_name",
            Kind::FieldBody => "field_body",
            Kind::Docinfo => "docinfo",
            Kind::Author => "author",
            Kind::Authors => "authors",
            Kind::Organization => "organization",
            Kind::Contact => "contact",
            Kind::Address => "address",
            Kind::Version => "version",
            Kind::Revision => "revision",
            Kind::Status => "status",
            Kind::Date => "date",
            Kind::Copyright => "copyright",
            Kind::LiteralBlock => "literal_block",
            Kind::DoctestBlock => "doctest_block",
            Kind::LineBlock => "line_block",
            Kind::Line => "line",
            Kind::BlockQuote => "block_quote",
            Kind::Attribution => "attribution",
            Kind::Table => "table",
            Kind::TableGroup => "tgroup",
            Kind::ColSpec => "colspec",
            Kind::TableHead => "thead",
            Kind::TableBody => "tbody",
            Kind::Row => "row",
            Kind::Entry => "entry",
            Kind::Figure => "figure",
            Kind::Caption => "caption",
            Kind::Legend => "legend",
            Kind::Image => "image",
            Kind::Raw => "raw",
            Kind::Target => "target",
            Kind::MathBlock => "math_block",
            Kind::Footnote => "footnote",
            Kind::Citation => "citation",
            Kind::Admonition => "admonition",
            Kind::Attention => "attention",
            Kind::Caution => "caution",
            Kind::Danger => "danger",
            Kind::Error => "error",
            Kind::Hint => "hint",
            Kind::Important => "important",
            Kind::Note => "note",
            Kind::Tip => "tip",
            Kind::Warning => "warning",
            Kind::SeeAlso => "seealso",
            Kind::Text => "#text",
            Kind::Emphasis => "emphasis",
            Kind::Strong => "strong",
            Kind::Literal => "literal",
            Kind::Reference => "reference",
            Kind::FootnoteReference => "footnote_reference",
            Kind::CitationReference => "citation_reference",
            Kind::Subscript => "subscript",
            Kind::Superscript => "superscript",
            Kind::TitleReference => "title_reference",
            Kind::Abbreviation => "abbreviation",
            Kind::Acronym => "acronym",
            Kind::Inline => "inline",
            Kind::Generated => "generated",
            Kind::Math => "math",
            Kind::Problematic => "problematic",
            Kind::Comment => "comment",
            Kind::SubstitutionDefinition => "substitution_definition",
            Kind::SystemMessage => "system_message",
            Kind::Pending => "pending",
            Kind::Unknown => "unknown",
        }
    }

    /// Map a docutils element name onto a kind.
    ///
    /// Unlisted names come back as [`Kind::Unknown`]; the caller decides
    /// whether to keep the raw name around for diagnostics.
    pub fn from_element_name(name: &str) -> Kind {
        match name {
            "document" => Kind::Document,
            "section" => Kind::Section,
            "title" => Kind::Title,
            "transition" => Kind::Transition,
            "topic" => Kind::Topic,
            "sidebar" => Kind::Sidebar,
            "rubric" => Kind::Rubric,
            "paragraph" => Kind::Paragraph,
            "bullet_list" => Kind::BulletList,
            "enumerated_list" => Kind::EnumeratedList,
            "list_item" => Kind::ListItem,
            "definition_list" => Kind::DefinitionList,
            "definition_list_item" => Kind::DefinitionListItem,
            "term" => Kind::Term,
            "definition" => Kind::Definition,
            "field_list" => Kind::FieldList,
            "field" => Kind::Field,
            "field_name" => Kind::FieldName,
            "field_body" => Kind::FieldBody,
            "docinfo" => Kind::Docinfo,
            "author" => Kind::Author,
            "authors" => Kind::Authors,
            "organization" => Kind::Organization,
            "contact" => Kind::Contact,
            "address" => Kind::Address,
            "version" => Kind::Version,
            "revision" => Kind::Revision,
            "status" => Kind::Status,
            "date" => Kind::Date,
            "copyright" => Kind::Copyright,
            "literal_block" => Kind::LiteralBlock,
            "doctest_block" => Kind::DoctestBlock,
            "line_block" => Kind::LineBlock,
            "line" => Kind::Line,
            "block_quote" => Kind::BlockQuote,
            "attribution" => Kind::Attribution,
            "table" => Kind::Table,
            "tgroup" => Kind::TableGroup,
            "colspec" => Kind::ColSpec,
            "thead" => Kind::TableHead,
            "tbody" => Kind::TableBody,
            "row" => Kind::Row,
            "entry" => Kind::Entry,
            "figure" => Kind::Figure,
            "caption" => Kind::Caption,
            "legend" => Kind::Legend,
            "image" => Kind::Image,
            "raw" => Kind::Raw,
            "target" => Kind::Target,
            "math_block" => Kind::MathBlock,
            "footnote" => Kind::Footnote,
            "citation" => Kind::Citation,
            "admonition" => Kind::Admonition,
            "attention" => Kind::Attention,
            "caution" => Kind::Caution,
            "danger" => Kind::Danger,
            "error" => Kind::Error,
            "hint" => Kind::Hint,
            "important" => Kind::Important,
            "note" => Kind::Note,
            "tip" => Kind::Tip,
            "warning" => Kind::Warning,
            "seealso" => Kind::SeeAlso,
            "emphasis" => Kind::Emphasis,
            "strong" => Kind::Strong,
            "literal" => Kind::Literal,
            "reference" => Kind::Reference,
            "footnote_reference" => Kind::FootnoteReference,
            "citation_reference" => Kind::CitationReference,
            "subscript" => Kind::Subscript,
            "superscript" => Kind::Superscript,
            "title_reference" => Kind::TitleReference,
            "abbreviation" => Kind::Abbreviation,
            "acronym" => Kind::Acronym,
            "inline" => Kind::Inline,
            "generated" => Kind::Generated,
            "math" => Kind::Math,
            "problematic" => Kind::Problematic,
            "comment" => Kind::Comment,
            "substitution_definition" => Kind::SubstitutionDefinition,
            "system_message" => Kind::SystemMessage,
            "pending" => Kind::Pending,
            _ => Kind::Unknown,
        }
    }
}
