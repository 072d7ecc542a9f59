//! The closed set of supported binary properties.
//!
//! Every property is one variant of [`BinaryProperty`], described by a row in
//! a static table: its long UCD name, the data key payloads are stored under,
//! the accessor name the C binding exposes, and whether its set is stored or
//! derived from other properties. Name lookup goes through one prebuilt map
//! instead of a chain of comparisons.
//!
//! Names match loosely (UAX #44 LM3): case, whitespace, `_` and `-` are
//! ignored, as is a leading "is". `White_Space`, `whitespace`, `WSpace` and
//! `isWhiteSpace` all name the same property.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::PropsError;

/// Where a property's set comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Loaded as a payload from the data source.
    Stored,
    /// Computed from other properties with set algebra.
    Derived,
}

/// Static description of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub property: BinaryProperty,
    /// Long UCD name, e.g. `White_Space`.
    pub long_name: &'static str,
    /// Data key: the UCD short alias, or a lowercase name where none exists.
    pub key: &'static str,
    /// Accessor name used by the C binding, e.g. `white_space`.
    pub binding_name: &'static str,
    /// True if the C binding has an accessor for it.
    pub exposed: bool,
    pub source: Source,
}

macro_rules! binary_properties {
    ($( $variant:ident => ($long:literal, $key:literal, $binding:literal, $exposed:literal, $source:ident), )*) => {
        /// A supported Unicode binary property.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BinaryProperty {
            $( $variant, )*
        }

        impl BinaryProperty {
            /// Every property, in declaration order.
            pub const ALL: &'static [BinaryProperty] = &[ $( BinaryProperty::$variant, )* ];
        }

        static TABLE: &[PropertyInfo] = &[
            $(
                PropertyInfo {
                    property: BinaryProperty::$variant,
                    long_name: $long,
                    key: $key,
                    binding_name: $binding,
                    exposed: $exposed,
                    source: Source::$source,
                },
            )*
        ];
    };
}

binary_properties! {
    AsciiHexDigit => ("ASCII_Hex_Digit", "AHex", "ascii_hex_digit", true, Stored),
    Alnum => ("Alnum", "alnum", "alnum", false, Stored),
    Alphabetic => ("Alphabetic", "Alpha", "alphabetic", true, Stored),
    BidiControl => ("Bidi_Control", "Bidi_C", "bidi_control", true, Stored),
    BidiMirrored => ("Bidi_Mirrored", "Bidi_M", "bidi_mirrored", true, Stored),
    Blank => ("Blank", "blank", "blank", false, Derived),
    Cased => ("Cased", "Cased", "cased", true, Stored),
    CaseIgnorable => ("Case_Ignorable", "CI", "case_ignorable", true, Stored),
    FullCompositionExclusion => ("Full_Composition_Exclusion", "Comp_Ex", "full_composition_exclusion", false, Stored),
    ChangesWhenCasefolded => ("Changes_When_Casefolded", "CWCF", "changes_when_casefolded", true, Stored),
    ChangesWhenCasemapped => ("Changes_When_Casemapped", "CWCM", "changes_when_casemapped", false, Derived),
    ChangesWhenNfkcCasefolded => ("Changes_When_NFKC_Casefolded", "CWKCF", "changes_when_nfkc_casefolded", true, Stored),
    ChangesWhenLowercased => ("Changes_When_Lowercased", "CWL", "changes_when_lowercased", true, Stored),
    ChangesWhenTitlecased => ("Changes_When_Titlecased", "CWT", "changes_when_titlecased", true, Stored),
    ChangesWhenUppercased => ("Changes_When_Uppercased", "CWU", "changes_when_uppercased", true, Stored),
    Dash => ("Dash", "Dash", "dash", true, Stored),
    Deprecated => ("Deprecated", "Dep", "deprecated", true, Stored),
    DefaultIgnorableCodePoint => ("Default_Ignorable_Code_Point", "DI", "default_ignorable_code_point", true, Stored),
    Diacritic => ("Diacritic", "Dia", "diacritic", true, Stored),
    EmojiModifierBase => ("Emoji_Modifier_Base", "EBase", "emoji_modifier_base", true, Stored),
    EmojiComponent => ("Emoji_Component", "EComp", "emoji_component", true, Stored),
    EmojiModifier => ("Emoji_Modifier", "EMod", "emoji_modifier", true, Stored),
    Emoji => ("Emoji", "Emoji", "emoji", true, Stored),
    EmojiPresentation => ("Emoji_Presentation", "EPres", "emoji_presentation", true, Stored),
    Extender => ("Extender", "Ext", "extender", true, Stored),
    ExtendedPictographic => ("Extended_Pictographic", "ExtPict", "extended_pictographic", true, Stored),
    Graph => ("Graph", "graph", "graph", false, Stored),
    GraphemeBase => ("Grapheme_Base", "Gr_Base", "grapheme_base", true, Stored),
    GraphemeExtend => ("Grapheme_Extend", "Gr_Ext", "grapheme_extend", true, Stored),
    GraphemeLink => ("Grapheme_Link", "Gr_Link", "grapheme_link", false, Stored),
    HexDigit => ("Hex_Digit", "Hex", "hex_digit", true, Stored),
    Hyphen => ("Hyphen", "Hyphen", "hyphen", false, Stored),
    IdContinue => ("ID_Continue", "IDC", "id_continue", true, Stored),
    Ideographic => ("Ideographic", "Ideo", "ideographic", true, Stored),
    IdStart => ("ID_Start", "IDS", "id_start", true, Stored),
    IdsBinaryOperator => ("IDS_Binary_Operator", "IDSB", "ids_binary_operator", true, Stored),
    IdsTrinaryOperator => ("IDS_Trinary_Operator", "IDST", "ids_trinary_operator", true, Stored),
    JoinControl => ("Join_Control", "Join_C", "join_control", true, Stored),
    LogicalOrderException => ("Logical_Order_Exception", "LOE", "logical_order_exception", true, Stored),
    Lowercase => ("Lowercase", "Lower", "lowercase", true, Stored),
    Math => ("Math", "Math", "math", true, Stored),
    NoncharacterCodePoint => ("Noncharacter_Code_Point", "NChar", "noncharacter_code_point", true, Stored),
    NfcInert => ("NFC_Inert", "nfcinert", "nfc_inert", false, Stored),
    NfdInert => ("NFD_Inert", "nfdinert", "nfd_inert", false, Stored),
    NfkcInert => ("NFKC_Inert", "nfkcinert", "nfkc_inert", false, Stored),
    NfkdInert => ("NFKD_Inert", "nfkdinert", "nfkd_inert", false, Stored),
    PatternSyntax => ("Pattern_Syntax", "Pat_Syn", "pattern_syntax", true, Stored),
    PatternWhiteSpace => ("Pattern_White_Space", "Pat_WS", "pattern_white_space", true, Stored),
    PrependedConcatenationMark => ("Prepended_Concatenation_Mark", "PCM", "prepended_concatenation_mark", false, Stored),
    Print => ("Print", "print", "print", false, Stored),
    QuotationMark => ("Quotation_Mark", "QMark", "quotation_mark", true, Stored),
    Radical => ("Radical", "Radical", "radical", true, Stored),
    RegionalIndicator => ("Regional_Indicator", "RI", "regional_indicator", true, Stored),
    SoftDotted => ("Soft_Dotted", "SD", "soft_dotted", true, Stored),
    SegmentStarter => ("Segment_Starter", "segstart", "segment_starter", false, Stored),
    CaseSensitive => ("Case_Sensitive", "Sensitive", "case_sensitive", false, Stored),
    SentenceTerminal => ("Sentence_Terminal", "STerm", "sentence_terminal", true, Stored),
    TerminalPunctuation => ("Terminal_Punctuation", "Term", "terminal_punctuation", true, Stored),
    UnifiedIdeograph => ("Unified_Ideograph", "UIdeo", "unified_ideograph", true, Stored),
    Uppercase => ("Uppercase", "Upper", "uppercase", true, Stored),
    VariationSelector => ("Variation_Selector", "VS", "variation_selector", true, Stored),
    WhiteSpace => ("White_Space", "WSpace", "white_space", true, Stored),
    Xdigit => ("Xdigit", "xdigit", "xdigit", false, Stored),
    XidContinue => ("XID_Continue", "XIDC", "xid_continue", true, Stored),
    XidStart => ("XID_Start", "XIDS", "xid_start", true, Stored),
}

/// Loose name → property, built once.
static BY_NAME: LazyLock<HashMap<String, BinaryProperty>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(TABLE.len() * 3);
    for info in TABLE {
        for name in [info.long_name, info.key, info.binding_name] {
            map.insert(loose(name), info.property);
        }
    }
    map
});

/// UAX #44 LM3 folding: lowercase, drop whitespace, `_` and `-`.
fn loose(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl BinaryProperty {
    /// Static description of this property.
    pub fn info(self) -> &'static PropertyInfo {
        // Declaration order and table order come from the same macro input.
        &TABLE[self as usize]
    }

    pub fn long_name(self) -> &'static str {
        self.info().long_name
    }

    /// Key payloads for this property are stored under.
    pub fn key(self) -> &'static str {
        self.info().key
    }

    pub fn binding_name(self) -> &'static str {
        self.info().binding_name
    }

    pub fn is_exposed(self) -> bool {
        self.info().exposed
    }

    pub fn source(self) -> Source {
        self.info().source
    }

    pub fn is_derived(self) -> bool {
        self.source() == Source::Derived
    }

    /// Resolve a long name, short alias or binding name, matched loosely.
    pub fn from_name(name: &str) -> Result<Self, PropsError> {
        let folded = loose(name);
        BY_NAME
            .get(&folded)
            .or_else(|| folded.strip_prefix("is").and_then(|rest| BY_NAME.get(rest)))
            .copied()
            .ok_or_else(|| PropsError::UnknownProperty {
                name: name.to_string(),
            })
    }

    /// Properties the C binding exposes.
    pub fn exposed() -> impl Iterator<Item = BinaryProperty> {
        Self::ALL.iter().copied().filter(|p| p.is_exposed())
    }
}

impl fmt::Display for BinaryProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long_name())
    }
}

impl FromStr for BinaryProperty {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
