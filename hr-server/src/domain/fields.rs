//! Static field metadata
//!
//! Each entity declares its storage schema once as an [`EntitySchema`]:
//! the table name, the constraint-carrying [`FieldDef`] list, the wire
//! field list and any unique-together groups. The validation engine and
//! the wire mapper both dispatch over this closed metadata instead of
//! inspecting values at run time, so adding a field to an entity's
//! schema is the only edit needed to validate and expose it.

/// Closed set of field kinds supported by the entity schemas.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// The document's own record id, rendered as a `table:key` string.
    Id,
    String,
    Integer,
    /// Monetary value with 2-decimal precision, carried as a canonical
    /// decimal string on the wire.
    Decimal,
    Boolean,
    /// RFC-3339 timestamp.
    DateTime,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// String drawn from a fixed value set.
    Enum(&'static [&'static str]),
    /// Record link to another entity. The function pointer breaks the
    /// cyclic static references between schemas.
    Reference(fn() -> &'static EntitySchema),
    List(&'static FieldKind),
}

/// Declared constraints for a single entity field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub unique: bool,
    /// Immutable once the entity has been persisted.
    pub immutable: bool,
    pub regex: Option<&'static str>,
    /// Message reported when the regex does not match.
    pub regex_message: Option<&'static str>,
    pub max_length: Option<usize>,
    pub min_int: Option<i64>,
    /// Minimum value for decimal fields, as a decimal literal.
    pub min_decimal: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            unique: false,
            immutable: false,
            regex: None,
            regex_message: None,
            max_length: None,
            min_int: None,
            min_decimal: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub const fn regex(mut self, pattern: &'static str) -> Self {
        self.regex = Some(pattern);
        self
    }

    pub const fn regex_message(mut self, message: &'static str) -> Self {
        self.regex_message = Some(message);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn min_int(mut self, min: i64) -> Self {
        self.min_int = Some(min);
        self
    }

    pub const fn min_decimal(mut self, min: &'static str) -> Self {
        self.min_decimal = Some(min);
        self
    }
}

/// Static schema description for one entity type.
#[derive(Debug)]
pub struct EntitySchema {
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    /// Declared wire field list; a field becomes visible by being listed
    /// here - there is no implicit include-all.
    pub wire_fields: &'static [&'static str],
    /// Groups of fields whose combined value must be unique per table.
    pub unique_together: &'static [&'static [&'static str]],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}
